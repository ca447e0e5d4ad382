//! Compile-time board geometry, masks, and hash signs.
//!
//! Mirrors the teacher's `common.rs`, which holds the chess board's fixed
//! masks (`RANK_MASKS`, `CASTLE_PATH_MASKS`, ...) as plain `const`s rather
//! than computing them at startup.

/// Number of playable houses, both sides combined; `BOARD_SIZE / 2` per side.
pub const BOARD_SIZE: usize = 12;

/// Total seeds in play; invariant over the whole match.
pub const SEED_COUNT: u32 = 48;

/// A store strictly above this value decides the match by majority.
pub const SEED_GOAL: u32 = 24;

/// Sentinel for "no move" (end-of-generation, or a search that found nothing).
pub const NULL_MOVE: i8 = -1;

/// South's store index within the 14-slot position.
pub const SOUTH_STORE: usize = 12;

/// North's store index within the 14-slot position.
pub const NORTH_STORE: usize = 13;

/// Number of slots in a position: 12 houses + 2 stores.
pub const POSITION_SIZE: usize = 14;

/// Bit `h` set iff house `h` belongs to south (houses 0..=5).
pub const SOUTH_MASK: u16 = 0b0000_0000_0011_1111;

/// Bit `h` set iff house `h` belongs to north (houses 6..=11).
pub const NORTH_MASK: u16 = 0b0000_1111_1100_0000;

/// High bit OR-ed into a hash to mark south to move.
pub const SOUTH_SIGN: u64 = 0x8_0000_0000_00;

/// High bit OR-ed into a hash to mark north to move (zero: north is the
/// "unmarked" side, matching the spec's `NORTH_SIGN=0`).
pub const NORTH_SIGN: u64 = 0;

/// Upper bound on heuristic scores; exact/terminal/database scores live
/// strictly above this in absolute value.
pub const MAX_SCORE: i32 = 1000;

/// Seeds each house starts with.
pub const INITIAL_SEEDS_PER_HOUSE: u8 = 4;
