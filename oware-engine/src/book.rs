//! Opening book reader (component G, §4.5, §6).
//!
//! The teacher's `OpeningBook` deserializes a single CBOR blob built into
//! the binary at compile time (`include_bytes!` + `ciborium::de`). This
//! format is instead a sorted flat file of fixed-size binary records read
//! at runtime, so the loader is a manual big-endian record parser and the
//! lookup is a binary search rather than a hash-map `find`.

use std::io::{BufReader, Read};

use oware_core::player::Player;
use oware_core::{Hash, Move};

use crate::error::DatabaseError;
use crate::search::Roots;
use crate::wire::read_header;

const SIGNATURE: &str = "Oware Opening Book ";
const RECORD_SIZE: usize = 20;
const NO_DATA: i16 = i16::MIN;

struct Record {
    hash: Hash,
    scores: [i16; 6],
}

impl Record {
    fn parse(bytes: &[u8]) -> Self {
        let hash = u64::from_be_bytes(bytes[0..8].try_into().unwrap());
        let mut scores = [0i16; 6];
        for (slot, chunk) in scores.iter_mut().zip(bytes[8..20].chunks_exact(2)) {
            *slot = i16::from_be_bytes(chunk.try_into().unwrap());
        }
        Self { hash, scores }
    }
}

pub struct OpeningBook {
    records: Vec<Record>,
}

impl OpeningBook {
    pub fn load<R: Read>(reader: R) -> Result<Self, DatabaseError> {
        let mut reader = BufReader::new(reader);
        read_header(&mut reader, SIGNATURE)?;

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(DatabaseError::TruncatedPayload {
                expected: bytes.len() - (bytes.len() % RECORD_SIZE) + RECORD_SIZE,
                found: bytes.len(),
            });
        }

        let records = bytes.chunks_exact(RECORD_SIZE).map(Record::parse).collect();
        Ok(Self { records })
    }

    fn find_record(&self, hash: Hash) -> Option<&Record> {
        self.records
            .binary_search_by_key(&hash, |record| record.hash)
            .ok()
            .map(|index| &self.records[index])
    }

    /// Picks the best-scored move at `hash` for `turn`, or `None` if the
    /// position isn't in the book or every slot in its record is
    /// unscored. Slot `i` (0..=5) is the `i`-th house in `turn`'s own
    /// range, matching the board-relative letter ordering in `notation.rs`.
    pub fn lookup(&self, hash: Hash, turn: Player) -> Option<(Move, i16)> {
        let record = self.find_record(hash)?;
        let (slot, score) = record
            .scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, score)| score != NO_DATA)
            .max_by_key(|&(_, score)| score)?;

        let base = match turn {
            Player::South => 0,
            Player::North => oware_core::constants::BOARD_SIZE / 2,
        };
        Some((Move((base + slot) as i8), score))
    }
}

impl Roots for OpeningBook {
    fn lookup(&self, hash: Hash, turn: Player) -> Option<Move> {
        OpeningBook::lookup(self, hash, turn).map(|(mv, _)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build_file(records: &[(Hash, [i16; 6])]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(SIGNATURE.as_bytes());
        bytes.push(b'\n');
        bytes.push(b'\n');
        for (hash, scores) in records {
            bytes.extend_from_slice(&hash.to_be_bytes());
            for score in scores {
                bytes.extend_from_slice(&score.to_be_bytes());
            }
        }
        bytes
    }

    #[test]
    fn test_lookup_picks_highest_scored_move() {
        let bytes = build_file(&[(42, [NO_DATA, 10, NO_DATA, 30, NO_DATA, 5])]);
        let book = OpeningBook::load(Cursor::new(bytes)).unwrap();
        let (m, score) = book.lookup(42, Player::South).unwrap();
        assert_eq!(m, Move(3));
        assert_eq!(score, 30);
    }

    #[test]
    fn test_lookup_offsets_for_north() {
        let bytes = build_file(&[(42, [1, NO_DATA, NO_DATA, NO_DATA, NO_DATA, NO_DATA])]);
        let book = OpeningBook::load(Cursor::new(bytes)).unwrap();
        let (m, _) = book.lookup(42, Player::North).unwrap();
        assert_eq!(m, Move(6));
    }

    #[test]
    fn test_lookup_miss_on_unknown_hash() {
        let bytes = build_file(&[(42, [1, 1, 1, 1, 1, 1])]);
        let book = OpeningBook::load(Cursor::new(bytes)).unwrap();
        assert!(book.lookup(99, Player::South).is_none());
    }

    #[test]
    fn test_lookup_none_when_every_slot_is_no_data() {
        let bytes = build_file(&[(42, [NO_DATA; 6])]);
        let book = OpeningBook::load(Cursor::new(bytes)).unwrap();
        assert!(book.lookup(42, Player::South).is_none());
    }

    #[test]
    fn test_binary_search_finds_middle_record() {
        let bytes = build_file(&[
            (1, [NO_DATA, NO_DATA, NO_DATA, NO_DATA, NO_DATA, 1]),
            (50, [NO_DATA, NO_DATA, NO_DATA, NO_DATA, NO_DATA, 2]),
            (100, [NO_DATA, NO_DATA, NO_DATA, NO_DATA, NO_DATA, 3]),
        ]);
        let book = OpeningBook::load(Cursor::new(bytes)).unwrap();
        let (_, score) = book.lookup(50, Player::South).unwrap();
        assert_eq!(score, 2);
    }
}
