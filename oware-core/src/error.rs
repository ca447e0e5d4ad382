use std::fmt::Display;

/// Errors surfaced when a position or board notation fails validation.
///
/// Mirrors the teacher's pattern of small, local error enums
/// (`MovePerformError`) instead of a blanket `anyhow::Error`: every variant
/// names exactly one way §3/§6 validation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    /// The house/store totals do not sum to `SEED_COUNT`.
    WrongSeedCount { found: u32 },
    /// A house or store held a value the 14-tuple cannot express.
    NegativeOrOverflowingHouse,
    /// The notation did not contain exactly 14 numbers plus a turn marker.
    MalformedNotation,
    /// The turn marker was not `S`/`N` (equivalently, not +1/-1).
    InvalidTurn,
}

impl Display for PositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongSeedCount { found } => {
                write!(f, "position holds {found} seeds, expected {}", crate::constants::SEED_COUNT)
            }
            Self::NegativeOrOverflowingHouse => write!(f, "a house or store value is out of range"),
            Self::MalformedNotation => write!(f, "malformed position notation"),
            Self::InvalidTurn => write!(f, "turn must be +1 (south) or -1 (north)"),
        }
    }
}

impl std::error::Error for PositionError {}

/// Errors surfaced by move notation parsing and by legality checks performed
/// at the external-interface boundary (`set_board`, notation parsing). A
/// move-legality violation *inside* `make_move` is a programmer error and is
/// `debug_assert!`ed instead, per the spec's error-propagation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The notation character was not in `A..F`/`a..f`.
    UnparseableNotation,
    /// The move was syntactically valid but is not in the current legal set.
    NotLegal,
    /// The notation's case did not match the side to move.
    WrongSideToMove,
}

impl Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnparseableNotation => write!(f, "unparseable move notation"),
            Self::NotLegal => write!(f, "move is not legal in the current position"),
            Self::WrongSideToMove => write!(f, "move notation case does not match the side to move"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Returned when the history stack would have to grow past `INT_MAX/16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    pub requested: usize,
    pub limit: usize,
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "history capacity {} exceeds the limit of {}",
            self.requested, self.limit
        )
    }
}

impl std::error::Error for CapacityError {}
