use std::fmt::Display;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The side to move. South always opens the match.
#[repr(u8)]
#[derive(IntoPrimitive, TryFromPrimitive, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    South = 0,
    North = 1,
}

impl Player {
    pub const ALL: &'static [Self] = &[Self::South, Self::North];

    /// +1 for south, -1 for north, matching the sign convention used by the
    /// perfect hash and by negamax's side-to-move perspective.
    pub fn sign(self) -> i32 {
        match self {
            Self::South => 1,
            Self::North => -1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::South => Self::North,
            Self::North => Self::South,
        }
    }
}

impl TryFrom<i32> for Player {
    type Error = crate::error::PositionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::South),
            -1 => Ok(Self::North),
            _ => Err(crate::error::PositionError::InvalidTurn),
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::South => write!(f, "S"),
            Self::North => write!(f, "N"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for p in Player::ALL {
            assert_eq!(p.opponent().opponent(), *p);
        }
    }

    #[test]
    fn test_sign_roundtrip() {
        assert_eq!(Player::try_from(1).unwrap(), Player::South);
        assert_eq!(Player::try_from(-1).unwrap(), Player::North);
        assert!(Player::try_from(0).is_err());
    }
}
