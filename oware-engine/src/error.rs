use std::fmt::Display;

/// Errors surfaced while loading or probing a database file (opening book
/// or endgame table). Mirrors `oware_core::error`'s small-local-enum
/// pattern rather than `anyhow::Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// The file didn't start with the expected signature line.
    BadSignature { expected: &'static str },
    /// The header ended (or the file ended) before a blank line was found.
    TruncatedHeader,
    /// The binary payload's length didn't match what the header promised.
    TruncatedPayload { expected: usize, found: usize },
    /// An I/O error while reading the file.
    Io(String),
}

impl Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadSignature { expected } => write!(f, "expected signature line {expected:?}"),
            Self::TruncatedHeader => write!(f, "header ended without a blank line"),
            Self::TruncatedPayload { expected, found } => {
                write!(f, "payload is {found} bytes, expected {expected}")
            }
            Self::Io(message) => write!(f, "io error: {message}"),
        }
    }
}

impl std::error::Error for DatabaseError {}

impl From<std::io::Error> for DatabaseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
