//! Endgame database reader (component F, §4.6, §6).
//!
//! Read once into memory, like the teacher's opening book
//! (`weechess-engine/src/book.rs` loads its whole CBOR blob up front rather
//! than streaming); unlike the book, this file has a free-text header
//! followed by a raw byte-per-position payload, so the loader here is a
//! small hand-rolled parser instead of a `ciborium::from_reader` call. The
//! indexing math follows §4.6's walk literally (south: full board,
//! high-to-low; north: rival half then own half) -- unlike the perfect
//! hash in `hash.rs`, this index only needs to be a consistent *forward*
//! map (there is no `unrank` for it), so there is no bijectivity proof to
//! reconcile it with, and the literal walk is exactly as good as any
//! reinterpretation.

use std::io::{BufReader, Read};

use oware_core::player::Player;
use oware_core::tables::BINOMIAL;
use oware_core::GameState;

use crate::error::DatabaseError;
use crate::search::Leaves;
use crate::wire::read_header;

const SIGNATURE: &str = "Oware Endgames ";

/// `flag` field of a decoded byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Empty,
    Cycle,
    Reserved,
    Exact,
}

impl Flag {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Self::Empty,
            1 => Self::Cycle,
            2 => Self::Reserved,
            _ => Self::Exact,
        }
    }
}

/// `sum_{i=0..=K} C(i+12, 12)`: cumulative position counts by total seeds
/// remaining on the board, used to size and bounds-check the payload.
fn lengths(k: usize) -> usize {
    (0..=k).map(|i| BINOMIAL[i][12] as usize).sum()
}

pub struct EndgameDatabase {
    k: u32,
    payload: Vec<u8>,
}

impl EndgameDatabase {
    pub fn load<R: Read>(reader: R) -> Result<Self, DatabaseError> {
        let mut reader = BufReader::new(reader);
        let fields = read_header(&mut reader, SIGNATURE)?;
        let k = fields.get("K").and_then(|v| v.parse().ok()).unwrap_or(12);

        let expected_len = 1 + lengths(k as usize);
        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;
        if payload.len() != expected_len {
            return Err(DatabaseError::TruncatedPayload { expected: expected_len, found: payload.len() });
        }

        Ok(Self { k, payload })
    }

    fn south_index(houses: &[u32; 12], captured: u32, k: u32) -> usize {
        let mut n = (15 - k) + captured;
        let mut rank: u64 = 0;
        for i in (0..12).rev() {
            rank += BINOMIAL[n as usize][i];
            n += houses[i];
        }
        rank as usize
    }

    fn north_index(houses: &[u32; 12], captured: u32, k: u32) -> usize {
        let mut n = (15 - k) + captured;
        let mut rank: u64 = 0;
        for i in (0..6).rev() {
            rank += BINOMIAL[n as usize][i + 6];
            n += houses[i];
        }
        for i in (6..12).rev() {
            rank += BINOMIAL[n as usize][i - 6];
            n += houses[i];
        }
        rank as usize
    }

    /// Probes the database for `houses`/`turn`. `last_move_was_capture`
    /// disambiguates a stored `Cycle` entry, which is only trustworthy
    /// right after a capture reset the repetition window. Returns `None`
    /// on a miss, a CYCLE entry that can't be trusted, or an out-of-range
    /// index; per §7, a database miss degrades to "not found", never an
    /// error surfaced to the caller.
    pub fn find(
        &self,
        houses: &[u32; 12],
        south_store: u32,
        north_store: u32,
        turn: Player,
        last_move_was_capture: bool,
    ) -> Option<i32> {
        let captured = south_store + north_store;
        if captured < oware_core::constants::SEED_COUNT - self.k {
            return None;
        }

        let own_store = match turn {
            Player::South => south_store,
            Player::North => north_store,
        };

        let index = match turn {
            Player::South => Self::south_index(houses, captured, self.k),
            Player::North => Self::north_index(houses, captured, self.k),
        };

        let byte = *self.payload.get(index)?;
        let flag = Flag::from_bits(byte & 0b11);
        let stored_offset = (byte >> 2) as u32;

        if flag == Flag::Empty || flag == Flag::Reserved {
            return None;
        }
        if flag == Flag::Cycle && !last_move_was_capture {
            return None;
        }

        let total = stored_offset + own_store;
        if total == oware_core::constants::SEED_GOAL {
            return Some(0);
        }

        let ahead = total > oware_core::constants::SEED_GOAL;
        Some(match flag {
            Flag::Cycle => {
                let magnitude = (captured << 4) as i32;
                if ahead { magnitude } else { -magnitude }
            }
            Flag::Exact => {
                if ahead { oware_core::constants::MAX_SCORE } else { -oware_core::constants::MAX_SCORE }
            }
            Flag::Empty | Flag::Reserved => unreachable!(),
        })
    }

    pub fn max_seeds_covered(&self) -> u32 {
        self.k
    }
}

impl Leaves for EndgameDatabase {
    fn find(&self, game: &GameState) -> Option<i32> {
        let houses: [u32; 12] = std::array::from_fn(|i| game.house(i));
        EndgameDatabase::find(
            self,
            &houses,
            game.house(oware_core::constants::SOUTH_STORE),
            game.house(oware_core::constants::NORTH_STORE),
            game.turn(),
            game.last_move_was_capture(),
        )
    }
}
