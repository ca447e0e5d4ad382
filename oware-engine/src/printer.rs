//! Game-state printer (ambient diagnostics).
//!
//! Adapted from the teacher's `GamePrinter`, which renders an 8x8 unicode
//! chessboard plus FEN/castling/clock metadata for a terminal embedder. An
//! Oware board has no pieces or castling state, so this instead renders
//! the 12 houses (north's row above, reversed to read left-to-right from
//! north's own perspective; south's row below) with seed counts, the two
//! stores, and the `notation::format_position` string in place of a FEN.

use std::fmt::Display;

use oware_core::constants::{BOARD_SIZE, NORTH_STORE, SOUTH_STORE};
use oware_core::{notation, GameState};

pub struct GamePrinter<'a> {
    pub game: &'a GameState,
}

impl<'a> GamePrinter<'a> {
    pub fn new(game: &'a GameState) -> Self {
        Self { game }
    }
}

impl Display for GamePrinter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let board = self.game.to_board();
        let half = BOARD_SIZE / 2;

        writeln!(f)?;
        writeln!(f, " {}", notation::format_position(&board, self.game.turn()))?;
        writeln!(f)?;

        write!(f, "       ")?;
        for letter in "fedcba".chars() {
            write!(f, "{letter:>4}")?;
        }
        writeln!(f)?;

        write!(f, "  {:>3} ", board[NORTH_STORE])?;
        for house in (half..BOARD_SIZE).rev() {
            write!(f, "{:>4}", board[house])?;
        }
        writeln!(f)?;

        write!(f, "       ")?;
        for house in 0..half {
            write!(f, "{:>4}", board[house])?;
        }
        writeln!(f, " {:>3}", board[SOUTH_STORE])?;

        write!(f, "       ")?;
        for letter in "ABCDEF".chars() {
            write!(f, "{letter:>4}")?;
        }
        writeln!(f)?;

        writeln!(f)?;
        writeln!(f, "  Turn to move: {}", self.game.turn())?;
        writeln!(f, "  Plies played: {}", self.game.length())?;
        writeln!(f, "  Hash: {:#x}", self.game.hash())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_start_position_without_panicking() {
        let game = GameState::new();
        let rendered = GamePrinter::new(&game).to_string();
        assert!(rendered.contains("Turn to move"));
        assert!(rendered.contains(&board_seed_count(&game).to_string()));
    }

    fn board_seed_count(game: &GameState) -> u32 {
        game.to_board().iter().sum()
    }
}
