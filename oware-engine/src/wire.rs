//! The text-header framing shared by the opening book and endgame table
//! file formats (§6): an ASCII signature line, `Key:Value` lines, a blank
//! line, then a binary payload. Split out because both `book.rs` and
//! `endgame.rs` parse exactly this shape before diverging on their payload.

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::DatabaseError;

pub fn read_header<R: BufRead>(
    reader: &mut R,
    signature: &'static str,
) -> Result<HashMap<String, String>, DatabaseError> {
    let mut signature_line = String::new();
    reader.read_line(&mut signature_line)?;
    if signature_line.trim_end() != signature.trim_end() {
        return Err(DatabaseError::BadSignature { expected: signature });
    }

    let mut fields = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(DatabaseError::TruncatedHeader);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parses_header_fields() {
        let bytes = b"Test Signature \nK:12\nVersion:1\n\npayload".to_vec();
        let mut reader = std::io::BufReader::new(Cursor::new(bytes));
        let fields = read_header(&mut reader, "Test Signature ").unwrap();
        assert_eq!(fields.get("K").map(String::as_str), Some("12"));
        assert_eq!(fields.get("Version").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_rejects_wrong_signature() {
        let bytes = b"Wrong Signature \n\n".to_vec();
        let mut reader = std::io::BufReader::new(Cursor::new(bytes));
        assert!(matches!(
            read_header(&mut reader, "Test Signature "),
            Err(DatabaseError::BadSignature { .. })
        ));
    }
}
