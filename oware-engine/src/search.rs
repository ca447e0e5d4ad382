//! Iterative-deepening negamax search (component H, §4.8).
//!
//! Grounded on the teacher's `Searcher` in the file this module replaces,
//! but stripped down to a single search thread: the teacher's Lazy-SMP
//! fan-out (one `rayon` worker per core, racing on a shared transposition
//! table) exists to keep chess's huge branching factor under control; this
//! crate's single-thread concurrency model (§5) has no such thread pool, so
//! the recursive search below is the sequential core of
//! `Searcher::analyze_recursive` with the multi-threaded harness removed.
//! The cooperative `CancellationToken` and the `SearchArtifact`-style
//! reusable-state carryover are both kept as-is.

use std::sync::{atomic::{AtomicBool, Ordering}, Arc};

use oware_core::player::Player;
use oware_core::{GameState, Hash, Move};

use crate::cache::{Flag, TranspositionCache};
use crate::config::SearchLimits;

/// Shared cooperative-cancellation flag: one `CancellationToken::new()`
/// call hands out a `(signal, listen)` pair, mirroring the teacher's type
/// of the same name.
#[derive(Clone)]
pub struct CancellationToken {
    aborted: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> (Self, Self) {
        let token = Self { aborted: Arc::new(AtomicBool::new(false)) };
        (token.clone(), token)
    }

    pub fn cancel(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}

/// Progress/report events emitted to an embedder-supplied callback; the
/// equivalent of the teacher's `StatusEvent`/`ControlEvent` pair (§4.10).
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Iteration { depth: u32, score: i32, flag: Flag, pv: Vec<Move> },
    Warning { message: String },
    Aborted,
}

/// The search's three external collaborators (§9's "polymorphism over
/// collaborators"): score lookup by hash, exact score at the endgame, and
/// a book move at the root. Each gets a no-op fallback so the search runs
/// standalone with no databases configured.
pub trait Leaves {
    fn find(&self, game: &GameState) -> Option<i32>;
}

pub struct NoLeaves;

impl Leaves for NoLeaves {
    fn find(&self, _game: &GameState) -> Option<i32> {
        None
    }
}

pub trait Roots {
    fn lookup(&self, hash: Hash, turn: Player) -> Option<Move>;
}

pub struct NoRoots;

impl Roots for NoRoots {
    fn lookup(&self, _hash: Hash, _turn: Player) -> Option<Move> {
        None
    }
}

/// The best move found (plus a pondering guess), the in-process analogue
/// of a UCI `bestmove`/`ponder` pair (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub ponder_move: Move,
    pub score: i32,
}

struct Interrupted;

pub struct Searcher<'a, L: Leaves, R: Roots> {
    cache: &'a mut TranspositionCache,
    leaves: &'a L,
    roots: &'a R,
    contempt: i32,
    root_player: Player,
    nodes_searched: usize,
    last_pv: Vec<Move>,
}

impl<'a, L: Leaves, R: Roots> Searcher<'a, L, R> {
    pub fn new(cache: &'a mut TranspositionCache, leaves: &'a L, roots: &'a R, contempt: i32) -> Self {
        Self {
            cache,
            leaves,
            roots,
            contempt,
            root_player: Player::South,
            nodes_searched: 0,
            last_pv: Vec::new(),
        }
    }

    /// Runs iterative deepening from depth 1 up to `limits.max_depth` (or
    /// until `token` is cancelled), emitting one `SearchEvent::Iteration`
    /// per completed depth. Returns the best-completed iteration's result,
    /// or a null move if none completed (§5's cancellation semantics).
    pub fn compute_best_move(
        &mut self,
        game: &mut GameState,
        limits: SearchLimits,
        token: &CancellationToken,
        on_event: &mut dyn FnMut(SearchEvent),
    ) -> SearchOutcome {
        self.root_player = game.turn();
        self.nodes_searched = 0;

        if let Some(mv) = self.roots.lookup(game.hash(), game.turn()) {
            return SearchOutcome { best_move: mv, ponder_move: Move::NULL, score: 0 };
        }

        let max_depth = limits.max_depth.unwrap_or(u32::MAX);
        let mut best = SearchOutcome { best_move: Move::NULL, ponder_move: Move::NULL, score: 0 };
        let mut window = oware_core::constants::MAX_SCORE;

        for depth in 1..=max_depth {
            if token.is_cancelled() {
                break;
            }

            let mut alpha = if depth == 1 { -oware_core::constants::MAX_SCORE } else { best.score - window };
            let mut beta = if depth == 1 { oware_core::constants::MAX_SCORE } else { best.score + window };

            let mut interrupted = false;
            let (score, flag) = 'aspiration: loop {
                match self.root_search(game, depth, alpha, beta, token) {
                    Err(Interrupted) => {
                        interrupted = true;
                        break 'aspiration (0, Flag::Exact);
                    }
                    Ok((score, flag)) => {
                        if flag == Flag::Lower && beta < oware_core::constants::MAX_SCORE {
                            beta = oware_core::constants::MAX_SCORE;
                            continue 'aspiration;
                        }
                        if flag == Flag::Upper && alpha > -oware_core::constants::MAX_SCORE {
                            alpha = -oware_core::constants::MAX_SCORE;
                            continue 'aspiration;
                        }
                        break 'aspiration (score, flag);
                    }
                }
            };

            if interrupted {
                on_event(SearchEvent::Aborted);
                break;
            }

            let pv = self.collect_pv(game, depth);
            if let Some(&first) = pv.first() {
                best = SearchOutcome {
                    best_move: first,
                    ponder_move: pv.get(1).copied().unwrap_or(Move::NULL),
                    score,
                };
            }
            self.last_pv = pv.clone();

            on_event(SearchEvent::Iteration { depth, score, flag, pv });

            window = oware_core::constants::MAX_SCORE / 4;

            if score.abs() >= oware_core::constants::MAX_SCORE {
                break;
            }
        }

        if self.cache.is_saturated() {
            on_event(SearchEvent::Warning { message: "transposition cache is full".to_string() });
        }

        best
    }

    pub fn get_ponder_move(&self) -> Move {
        self.last_pv.get(1).copied().unwrap_or(Move::NULL)
    }

    fn root_search(
        &mut self,
        game: &mut GameState,
        depth: u32,
        alpha: i32,
        beta: i32,
        token: &CancellationToken,
    ) -> Result<(i32, Flag), Interrupted> {
        self.negamax(game, depth, 0, alpha, beta, token)
    }

    fn collect_pv(&mut self, game: &mut GameState, max_len: u32) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut played = 0u32;
        while played < max_len && self.cache.find(game.hash()) {
            let mv = self.cache.get_move();
            if mv.is_null() || !game.is_legal(mv) {
                break;
            }
            pv.push(mv);
            game.make_move(mv);
            played += 1;
        }
        for _ in 0..played {
            game.unmake_move();
        }
        pv
    }

    /// Negamax over `game`, from `game.turn()`'s perspective. Mirrors
    /// §4.8's six numbered steps.
    fn negamax(
        &mut self,
        game: &mut GameState,
        remaining_depth: u32,
        ply: u32,
        alpha: i32,
        beta: i32,
        token: &CancellationToken,
    ) -> Result<(i32, Flag), Interrupted> {
        self.nodes_searched += 1;
        if self.nodes_searched % 4096 == 0 && token.is_cancelled() {
            return Err(Interrupted);
        }

        let mut alpha = alpha;
        let mut beta = beta;
        let hash = game.hash();

        if self.cache.find(hash) {
            let cached_depth = self.cache.get_depth();
            if cached_depth >= remaining_depth {
                match self.cache.get_flag() {
                    Flag::Exact => return Ok((self.cache.get_score(), Flag::Exact)),
                    Flag::Lower => alpha = alpha.max(self.cache.get_score()),
                    Flag::Upper => beta = beta.min(self.cache.get_score()),
                    Flag::Empty => {}
                }
                if alpha >= beta {
                    return Ok((self.cache.get_score(), Flag::Lower));
                }
            }
        }

        if game.has_ended() {
            return Ok((self.outcome_score(game), Flag::Exact));
        }

        if let Some(score) = self.leaves.find(game) {
            return Ok((score, Flag::Exact));
        }

        if remaining_depth == 0 {
            let score = game.score();
            let score = if game.turn() == Player::South { score } else { -score };
            return Ok((score, Flag::Exact));
        }

        let original_alpha = alpha;
        let mut best_score = -oware_core::constants::MAX_SCORE - 1;
        let mut best_move = Move::NULL;

        game.reset_cursor();
        loop {
            let mv = game.next_move();
            if mv.is_null() {
                break;
            }

            game.make_move(mv);
            let child = self.negamax(game, remaining_depth - 1, ply + 1, -beta, -alpha, token);
            game.unmake_move();

            let (child_score, _) = child?;
            let score = -child_score;

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let flag = if best_score <= original_alpha {
            Flag::Upper
        } else if best_score >= beta {
            Flag::Lower
        } else {
            Flag::Exact
        };

        self.cache.store(hash, best_move, best_score, remaining_depth, flag);
        Ok((best_score, flag))
    }

    /// Terminal score from the side-to-move's perspective. `game.outcome()`
    /// is south-relative, so a store-majority win/loss is negated for
    /// north to move; a repetition draw is instead biased by `contempt`,
    /// applied from the root player's perspective and negated for the
    /// opponent so contempt reflects a persistent engine-wide preference
    /// rather than a per-node one.
    fn outcome_score(&self, game: &GameState) -> i32 {
        let outcome = game.outcome();
        if outcome != 0 {
            return if game.turn() == Player::South { outcome } else { -outcome };
        }
        if game.turn() == self.root_player { self.contempt } else { -self.contempt }
    }
}

impl TranspositionCache {
    /// Exposes the slot count as both a current-load accessor (via
    /// `len`/`capacity`) and this convenience for the "fully saturated"
    /// warning threshold.
    pub fn is_saturated(&self) -> bool {
        self.len() == self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oware_core::GameState;

    #[test]
    fn test_depth_one_returns_a_legal_move() {
        let mut game = GameState::new();
        let mut cache = TranspositionCache::with_bytes(1 << 16);
        let leaves = NoLeaves;
        let roots = NoRoots;
        let mut searcher = Searcher::new(&mut cache, &leaves, &roots, crate::config::DEFAULT_CONTEMPT);
        let limits = SearchLimits::depth(1);
        let (token, listen) = CancellationToken::new();
        let mut events = Vec::new();
        let outcome = searcher.compute_best_move(&mut game, limits, &listen, &mut |e| events.push(e));
        let _ = token;
        assert!(!outcome.best_move.is_null());
        assert!(game.is_legal(outcome.best_move));
        assert!(events.iter().any(|e| matches!(e, SearchEvent::Iteration { .. })));
    }

    #[test]
    fn test_cancellation_returns_best_completed_iteration() {
        let mut game = GameState::new();
        let mut cache = TranspositionCache::with_bytes(1 << 16);
        let leaves = NoLeaves;
        let roots = NoRoots;
        let mut searcher = Searcher::new(&mut cache, &leaves, &roots, crate::config::DEFAULT_CONTEMPT);
        let limits = SearchLimits::depth(1);
        let (signal, listen) = CancellationToken::new();
        signal.cancel();
        let outcome = searcher.compute_best_move(&mut game, limits, &listen, &mut |_| {});
        assert_eq!(outcome.best_move, Move::NULL);
    }

    #[test]
    fn test_cancellation_token_pair_shares_state() {
        let (signal, listen) = CancellationToken::new();
        assert!(!listen.is_cancelled());
        signal.cancel();
        assert!(listen.is_cancelled());
    }
}
