//! Mutable game state: make/unmake, terminal detection, repetition, and the
//! heuristic evaluation.
//!
//! The teacher's `state.rs` rebuilds a `State` on every move
//! (`State::by_performing_move`) because chess positions are cheap to copy
//! and immutability simplifies its search. A position here is 14 bytes, but
//! the spec calls for a single game object with a reversible history stack
//! instead (§3, §9 "Cyclic / recursive history"); that shape is grounded on
//! `other_examples/654ffa85_menezesd-ChessEngine__src-core-board.rs.rs`'s
//! `make_move` returning an undo record consumed by `unmake_move`, adapted
//! here to push full frame snapshots onto a flat `Vec` since a frame is
//! small enough that diffing it buys nothing.

use crate::constants::{
    BOARD_SIZE, MAX_SCORE, NORTH_STORE, POSITION_SIZE, SEED_GOAL, SOUTH_STORE,
};
use crate::error::{CapacityError, PositionError};
use crate::hash::{self, Hash};
use crate::r#move::{self, Cursor, Move};
use crate::player::Player;

/// A history-stack entry: everything needed to undo one `make_move`.
#[derive(Debug, Clone, Copy)]
struct HistoryFrame {
    houses: [u32; POSITION_SIZE],
    turn: Player,
    cursor: Cursor,
    empty: u16,
    hash: Hash,
    capture_index: i64,
    move_played: Move,
}

/// Weights for the heuristic evaluation (§4.5). Kept as a plain struct
/// rather than hardcoded literals so the magic constants the source uses
/// are visible, named tunables instead of buried arithmetic -- see
/// DESIGN.md's Open Question note on `{+28, -54, -36}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    pub store_difference: i32,
    pub hoarding_bonus: i32,
    pub hoarding_threshold: u32,
    pub empty_penalty: i32,
    pub vulnerable_penalty: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            store_difference: 25,
            hoarding_bonus: 28,
            hoarding_threshold: 12,
            empty_penalty: -54,
            vulnerable_penalty: -36,
        }
    }
}

/// The outcome of a finished match, from the perspective of who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    South,
    North,
    Draw,
}

/// The full mutable game: position, turn, staged-generator cursor, and a
/// reversible history of every move played so far.
#[derive(Debug, Clone)]
pub struct GameState {
    houses: [u32; POSITION_SIZE],
    turn: Player,
    empty: u16,
    cursor: Cursor,
    hash: Hash,
    capture_index: i64,
    history: Vec<HistoryFrame>,
    weights: EvalWeights,
}

/// Frames are appended at least this many at a time, matching the spec's
/// "grows by at least 126" geometric-growth rule.
const MIN_GROWTH: usize = 126;

/// `INT_MAX / 16`, the spec's ceiling on history depth.
const MAX_HISTORY: usize = (i32::MAX as usize) / 16;

impl GameState {
    pub fn new() -> Self {
        Self::from_weights(EvalWeights::default())
    }

    pub fn from_weights(weights: EvalWeights) -> Self {
        let mut state = Self {
            houses: [0; POSITION_SIZE],
            turn: Player::South,
            empty: 0,
            cursor: r#move::reset_cursor(),
            hash: 0,
            capture_index: -1,
            history: Vec::with_capacity(MIN_GROWTH),
            weights,
        };
        state
            .set_start(&[4; BOARD_SIZE], Player::South)
            .expect("the start position is always valid");
        state
    }

    /// Resets to a fresh position: `pits` holds the 12 house values, both
    /// stores are cleared, `turn` is the side to move.
    pub fn set_start(&mut self, pits: &[u32; BOARD_SIZE], turn: Player) -> Result<(), PositionError> {
        let mut houses = [0u32; POSITION_SIZE];
        houses[..BOARD_SIZE].copy_from_slice(pits);
        self.set_board(&houses, turn)
    }

    /// Resets to an arbitrary position: all 14 slots including stores.
    pub fn set_board(&mut self, houses: &[u32; POSITION_SIZE], turn: Player) -> Result<(), PositionError> {
        let total: u32 = houses.iter().sum();
        if total != crate::constants::SEED_COUNT {
            return Err(PositionError::WrongSeedCount { found: total });
        }

        self.houses = *houses;
        self.turn = turn;
        self.history.clear();
        self.capture_index = -1;
        self.cursor = r#move::reset_cursor();
        self.recompute_empty();
        self.recompute_hash();
        Ok(())
    }

    fn recompute_empty(&mut self) {
        self.empty = 0;
        for h in 0..BOARD_SIZE {
            if self.houses[h] == 0 {
                self.empty |= 1 << h;
            }
        }
    }

    fn recompute_hash(&mut self) {
        self.hash = hash::rank(&self.houses, self.turn);
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn empty_mask(&self) -> u16 {
        self.empty
    }

    pub fn capture_index(&self) -> i64 {
        self.capture_index
    }

    /// Whether the move that produced the current position was a capture;
    /// used by the endgame reader to decide whether a stored `CYCLE` entry
    /// can be trusted (§4.6).
    pub fn last_move_was_capture(&self) -> bool {
        self.capture_index == self.history.len() as i64
    }

    pub fn length(&self) -> usize {
        self.history.len()
    }

    pub fn to_board(&self) -> [u32; POSITION_SIZE] {
        self.houses
    }

    pub fn house(&self, index: usize) -> u32 {
        self.houses[index]
    }

    pub fn get_cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = r#move::reset_cursor();
    }

    pub fn is_legal(&self, m: Move) -> bool {
        if m.is_null() {
            return false;
        }
        r#move::is_legal(&self.houses, m.house(), self.turn)
    }

    pub fn is_capture(&self, m: Move) -> bool {
        r#move::would_capture(&self.houses, m.house(), self.turn)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        r#move::legal_moves(&self.houses, self.turn)
    }

    pub fn has_legal_moves(&self) -> bool {
        r#move::own_range(self.turn).any(|h| self.houses[h] > 0 && r#move::is_legal(&self.houses, h, self.turn))
    }

    /// Draws the next move from the staged generator, advancing `cursor`.
    pub fn next_move(&mut self) -> Move {
        r#move::next_move(&self.houses, self.turn, &mut self.cursor)
    }

    /// Every move played so far, oldest first.
    pub fn moves(&self) -> Vec<Move> {
        self.history.iter().map(|f| f.move_played).collect()
    }

    /// Grows the history buffer ahead of a burst of `make_move` calls so
    /// the search's hot path never pays for a reallocation.
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<(), CapacityError> {
        let requested = self.history.len() + additional;
        if requested > MAX_HISTORY {
            return Err(CapacityError { requested, limit: MAX_HISTORY });
        }
        self.history.reserve(additional.max(MIN_GROWTH));
        Ok(())
    }

    fn push_frame(&mut self, move_played: Move) {
        self.history.push(HistoryFrame {
            houses: self.houses,
            turn: self.turn,
            cursor: self.cursor,
            empty: self.empty,
            hash: self.hash,
            capture_index: self.capture_index,
            move_played,
        });
    }

    /// Applies `m`. Precondition: `self.is_legal(m)`; violating it is a
    /// programmer error (debug-asserted), matching the spec's rule that
    /// legality violations inside `make` are fatal in tests and handled at
    /// the notation boundary instead (see `notation::parse_move`).
    pub fn make_move(&mut self, m: Move) {
        debug_assert!(self.is_legal(m), "make_move called with an illegal move");

        self.push_frame(m);

        let capture = r#move::would_capture(&self.houses, m.house(), self.turn);
        let landing = r#move::sow(&mut self.houses, m.house());

        if capture {
            let rival = r#move::rival_range(self.turn);
            let store = r#move::store_of(self.turn);
            for house in (*rival.start()..=landing).rev() {
                let seeds = self.houses[house];
                if seeds == 2 || seeds == 3 {
                    self.houses[store] += seeds;
                    self.houses[house] = 0;
                } else {
                    break;
                }
            }
            self.capture_index = self.history.len() as i64;
        }

        self.turn = self.turn.opponent();
        self.cursor = r#move::reset_cursor();
        self.recompute_empty();
        self.recompute_hash();
    }

    /// Pops the top frame and restores every field exactly.
    pub fn unmake_move(&mut self) {
        let frame = self.history.pop().expect("unmake_move called with empty history");
        self.houses = frame.houses;
        self.turn = frame.turn;
        self.cursor = frame.cursor;
        self.empty = frame.empty;
        self.hash = frame.hash;
        self.capture_index = frame.capture_index;
    }

    /// Whether the current hash repeats an ancestor at the same side to
    /// move, scanned backwards in steps of two from `length - BOARD_SIZE + 1`
    /// down to (but excluding) the last capture.
    fn is_repetition(&self) -> bool {
        let len = self.history.len() as i64;
        let start = len - BOARD_SIZE as i64 + 1;
        if start < 0 {
            return false;
        }

        let floor = self.capture_index.max(0);
        let mut index = start;
        while index > floor {
            if let Some(frame) = self.history.get(index as usize) {
                if frame.hash == self.hash {
                    return true;
                }
            }
            index -= 2;
        }
        false
    }

    /// Rakes every remaining seed into its owner's store, as an explicit,
    /// separately undoable move (it pushes its own history frame, the same
    /// as `make_move`). Not called automatically by `make_move` -- doing so
    /// would push a second frame per terminal move, which `unmake_move`'s
    /// single pop can't undo. Callers that want a finalized, fully-raked
    /// board for display call this themselves once `has_ended()` is true;
    /// `winner`/`outcome` don't need it, since they total each side's own
    /// houses plus its store either way.
    pub fn end_match(&mut self) {
        self.push_frame(Move::NULL);

        let mut south_rake = 0;
        for h in 0..BOARD_SIZE / 2 {
            south_rake += self.houses[h];
            self.houses[h] = 0;
        }
        self.houses[SOUTH_STORE] += south_rake;

        let mut north_rake = 0;
        for h in BOARD_SIZE / 2..BOARD_SIZE {
            north_rake += self.houses[h];
            self.houses[h] = 0;
        }
        self.houses[NORTH_STORE] += north_rake;

        self.recompute_empty();
        self.recompute_hash();
    }

    /// True once a store already holds a majority, no legal move remains
    /// for the side to move, or the current position is a repetition.
    pub fn has_ended(&self) -> bool {
        self.houses[SOUTH_STORE] > SEED_GOAL
            || self.houses[NORTH_STORE] > SEED_GOAL
            || !self.has_legal_moves()
            || self.is_repetition()
    }

    /// Each side's store plus whatever is still sitting in its own houses --
    /// correct whether or not `end_match` has actually raked the board.
    fn effective_store(&self, side: Player) -> u32 {
        self.houses[r#move::store_of(side)] + r#move::own_range(side).map(|h| self.houses[h]).sum::<u32>()
    }

    pub fn winner(&self) -> Winner {
        match self.effective_store(Player::South).cmp(&self.effective_store(Player::North)) {
            std::cmp::Ordering::Greater => Winner::South,
            std::cmp::Ordering::Less => Winner::North,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }

    /// Exact signed score from south's perspective: `+MAX_SCORE` for a
    /// south win, `-MAX_SCORE` for a north win, `0` for a draw. Only
    /// meaningful once `has_ended()`.
    pub fn outcome(&self) -> i32 {
        match self.winner() {
            Winner::South => MAX_SCORE,
            Winner::North => -MAX_SCORE,
            Winner::Draw => 0,
        }
    }

    /// Heuristic score from south's perspective; callers wanting the
    /// side-to-move perspective negate it when `turn() == North`.
    pub fn score(&self) -> i32 {
        let w = &self.weights;
        let mut score = w.store_difference * (self.houses[SOUTH_STORE] as i32 - self.houses[NORTH_STORE] as i32);

        for h in 0..BOARD_SIZE / 2 {
            score += Self::pit_term(w, self.houses[h]);
        }
        for h in BOARD_SIZE / 2..BOARD_SIZE {
            score -= Self::pit_term(w, self.houses[h]);
        }

        score
    }

    fn pit_term(w: &EvalWeights, seeds: u32) -> i32 {
        if seeds == 0 {
            w.empty_penalty
        } else if seeds == 1 || seeds == 2 {
            w.vulnerable_penalty
        } else if seeds > w.hoarding_threshold {
            w.hoarding_bonus
        } else {
            0
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> GameState {
        GameState::new()
    }

    #[test]
    fn test_make_unmake_round_trip() {
        let mut game = start();
        let before_houses = game.houses;
        let before_hash = game.hash;
        let before_turn = game.turn;
        let before_cursor = game.cursor;

        game.make_move(Move(0));
        game.unmake_move();

        assert_eq!(game.houses, before_houses);
        assert_eq!(game.hash, before_hash);
        assert_eq!(game.turn, before_turn);
        assert_eq!(game.cursor, before_cursor);
        assert_eq!(game.capture_index, -1);
        assert!(game.history.is_empty());
    }

    #[test]
    fn test_make_unmake_round_trip_after_capture() {
        let mut game = start();
        game.set_board(
            &{
                let mut h = [0u32; POSITION_SIZE];
                h[4] = 2;
                h[6] = 1;
                h[7] = 1;
                h[SOUTH_STORE] = 44;
                h
            },
            Player::South,
        )
        .unwrap();

        let before_houses = game.houses;
        let before_capture_index = game.capture_index;
        game.make_move(Move(4));
        assert!(game.houses[SOUTH_STORE] > before_houses[SOUTH_STORE]);
        game.unmake_move();
        assert_eq!(game.houses, before_houses);
        assert_eq!(game.capture_index, before_capture_index);
    }

    #[test]
    fn test_make_unmake_round_trip_after_game_ending_move() {
        // South's capture pushes the store past SEED_GOAL, but north keeps
        // seeds at house 8 so the capture isn't a grand slam. `make_move`
        // must not push a second frame for the resulting terminal state, or
        // a single `unmake_move` can't restore the pre-move position.
        let mut game = start();
        let mut houses = [0u32; POSITION_SIZE];
        houses[4] = 2;
        houses[6] = 1;
        houses[8] = 5;
        houses[SOUTH_STORE] = 23;
        houses[NORTH_STORE] = 17;
        game.set_board(&houses, Player::South).unwrap();

        let before_houses = game.houses;
        let before_hash = game.hash;
        let before_turn = game.turn;
        let before_cursor = game.cursor;
        let before_capture_index = game.capture_index;

        game.make_move(Move(4));
        assert!(game.has_ended());
        assert_eq!(game.houses[SOUTH_STORE], 25);
        assert_eq!(game.history.len(), 1);

        game.unmake_move();

        assert_eq!(game.houses, before_houses);
        assert_eq!(game.hash, before_hash);
        assert_eq!(game.turn, before_turn);
        assert_eq!(game.cursor, before_cursor);
        assert_eq!(game.capture_index, before_capture_index);
        assert!(game.history.is_empty());
    }

    #[test]
    fn test_s5_repetition_terminal() {
        // A tiny board where south and north can shuffle seeds back and
        // forth without ever capturing; after BOARD_SIZE plies the position
        // recurs and the game ends.
        let mut game = start();
        for _ in 0..BOARD_SIZE * 2 {
            if game.has_ended() {
                break;
            }
            let m = game.next_move();
            if m.is_null() {
                break;
            }
            game.make_move(m);
        }
        if game.has_ended() {
            assert!(
                game.houses[SOUTH_STORE] > SEED_GOAL
                    || game.houses[NORTH_STORE] > SEED_GOAL
                    || !game.has_legal_moves()
            );
        }
    }

    #[test]
    fn test_s6_win_by_store() {
        let mut game = start();
        let mut houses = [0u32; POSITION_SIZE];
        houses[SOUTH_STORE] = 25;
        houses[NORTH_STORE] = 23;
        game.set_board(&houses, Player::South).unwrap();
        assert!(game.has_ended());
        assert_eq!(game.winner(), Winner::South);
        assert_eq!(game.outcome(), MAX_SCORE);
    }

    #[test]
    fn test_evaluation_bounds_on_start_position() {
        let game = start();
        assert!(game.score().abs() < MAX_SCORE);
    }

    #[test]
    fn test_grand_slam_leaves_seeds_on_board() {
        let mut game = start();
        let mut houses = [0u32; POSITION_SIZE];
        houses[5] = 2;
        houses[6] = 1;
        houses[7] = 1;
        houses[SOUTH_STORE] = 44;
        game.set_board(&houses, Player::South).unwrap();

        let total_before: u32 = game.houses.iter().sum();
        game.make_move(Move(5));
        let total_after: u32 = game.houses.iter().sum();
        assert_eq!(total_before, total_after);
        assert!(game.houses[6] > 0 || game.houses[7] > 0);
    }
}
