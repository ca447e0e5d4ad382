//! External wire notation for positions and moves (component D, §6).
//!
//! The teacher's `notation.rs` builds a generic `Notation<T, F>`/`IntoNotation`
//! trait machinery shared across FEN, PGN-ish SAN, and PEG board strings,
//! because chess has several competing textual formats. Oware's notation
//! has exactly two formats, each a single fixed grammar, so this module
//! skips the generic trait layer the teacher needs for its larger format
//! zoo and writes straightforward `parse_*`/`format_*` functions instead --
//! still grounded in the teacher's split between "board notation" and
//! "move notation" as two independent concerns.

use crate::constants::{BOARD_SIZE, POSITION_SIZE, SEED_COUNT};
use crate::error::{MoveError, PositionError};
use crate::player::Player;
use crate::r#move::{own_range, Move};

/// Parses `4-4-4-4-4-4-4-4-4-4-4-4-0-0-S` into a 14-slot board plus turn.
pub fn parse_position(text: &str) -> Result<([u32; POSITION_SIZE], Player), PositionError> {
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() != POSITION_SIZE + 1 {
        return Err(PositionError::MalformedNotation);
    }

    let mut houses = [0u32; POSITION_SIZE];
    for (slot, text) in houses.iter_mut().zip(&parts[..POSITION_SIZE]) {
        *slot = text.parse().map_err(|_| PositionError::MalformedNotation)?;
    }

    if houses.iter().sum::<u32>() != SEED_COUNT {
        return Err(PositionError::WrongSeedCount { found: houses.iter().sum() });
    }

    let turn = match parts[POSITION_SIZE] {
        "S" => Player::South,
        "N" => Player::North,
        _ => return Err(PositionError::InvalidTurn),
    };

    Ok((houses, turn))
}

/// Emits the inverse of [`parse_position`].
pub fn format_position(houses: &[u32; POSITION_SIZE], turn: Player) -> String {
    let mut out = String::new();
    for seeds in houses {
        out.push_str(&seeds.to_string());
        out.push('-');
    }
    out.push_str(match turn {
        Player::South => "S",
        Player::North => "N",
    });
    out
}

/// Parses one move-notation character: `A..F` for south, `a..f` for north.
/// Returns `MoveError::WrongSideToMove` if the letter case doesn't match
/// `turn`, and `MoveError::UnparseableNotation` if it isn't a house letter
/// at all.
pub fn parse_move(ch: char, turn: Player) -> Result<Move, MoveError> {
    let (base, expected_turn) = if ch.is_ascii_uppercase() {
        ('A', Player::South)
    } else if ch.is_ascii_lowercase() {
        ('a', Player::North)
    } else {
        return Err(MoveError::UnparseableNotation);
    };

    if expected_turn != turn {
        return Err(MoveError::WrongSideToMove);
    }

    let offset = ch as i32 - base as i32;
    if !(0..(BOARD_SIZE / 2) as i32).contains(&offset) {
        return Err(MoveError::UnparseableNotation);
    }

    let house = match turn {
        Player::South => offset as usize,
        Player::North => BOARD_SIZE / 2 + offset as usize,
    };
    Ok(Move(house as i8))
}

/// Emits the single notation character for `m`, given the side that played
/// it. Panics if `m` isn't a house belonging to `turn`; callers only ever
/// format moves they themselves generated or validated.
pub fn format_move(m: Move, turn: Player) -> char {
    let house = m.house();
    assert!(own_range(turn).contains(&house), "move does not belong to the given side");

    match turn {
        Player::South => (b'A' + house as u8) as char,
        Player::North => (b'a' + (house - BOARD_SIZE / 2) as u8) as char,
    }
}

/// Parses a whole game-log string: one character per ply, case alternating
/// starting with `first_to_move`.
pub fn parse_moves(text: &str, first_to_move: Player) -> Result<Vec<Move>, MoveError> {
    let mut turn = first_to_move;
    let mut moves = Vec::with_capacity(text.len());
    for ch in text.chars() {
        moves.push(parse_move(ch, turn)?);
        turn = turn.opponent();
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NORTH_STORE, SOUTH_STORE};

    #[test]
    fn test_parse_start_position() {
        let (houses, turn) = parse_position("4-4-4-4-4-4-4-4-4-4-4-4-0-0-S").unwrap();
        assert_eq!(turn, Player::South);
        assert_eq!(houses[SOUTH_STORE], 0);
        assert_eq!(houses[NORTH_STORE], 0);
        assert_eq!(houses[0], 4);
    }

    #[test]
    fn test_position_round_trip() {
        let text = "4-4-4-4-4-4-4-4-4-4-4-4-0-0-S";
        let (houses, turn) = parse_position(text).unwrap();
        assert_eq!(format_position(&houses, turn), text);
    }

    #[test]
    fn test_wrong_seed_count_rejected() {
        assert!(parse_position("4-4-4-4-4-4-4-4-4-4-4-4-0-1-S").is_err());
    }

    #[test]
    fn test_move_letters_round_trip() {
        for house in 0..BOARD_SIZE {
            let turn = if house < BOARD_SIZE / 2 { Player::South } else { Player::North };
            let m = Move(house as i8);
            let ch = format_move(m, turn);
            assert_eq!(parse_move(ch, turn).unwrap(), m);
        }
    }

    #[test]
    fn test_wrong_case_is_wrong_side() {
        assert_eq!(parse_move('a', Player::South), Err(MoveError::WrongSideToMove));
        assert_eq!(parse_move('A', Player::North), Err(MoveError::WrongSideToMove));
    }

    #[test]
    fn test_parse_moves_alternates_case() {
        let moves = parse_moves("Aa", Player::South).unwrap();
        assert_eq!(moves, vec![Move(0), Move(6)]);
        assert!(parse_moves("AA", Player::South).is_err());
    }
}
