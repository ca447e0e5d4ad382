//! Process-wide immutable tables computed once at startup.
//!
//! Mirrors the teacher's `attacks::data` module, which precomputes magic
//! bitboard tables behind `lazy_static!` rather than hand-writing them as
//! literals, because they are mechanically derivable from the board
//! geometry.

use lazy_static::lazy_static;

use crate::constants::{BOARD_SIZE, POSITION_SIZE, SEED_COUNT};

/// `REAPER[from][seeds]` is the landing house after sowing `seeds` seeds
/// starting just after `from`, skipping `from` itself on every lap. `-1`
/// means no seed was sown (`seeds == 0`), which cannot happen for a real
/// move (a move always starts from a non-empty house) but is kept as an
/// explicit sentinel so the table is total.
pub type ReaperTable = Vec<Vec<i32>>;

/// `COEFF[n][i]` is `C(n + i, i)`, the number of ways to distribute `n`
/// indistinguishable seeds over `i + 1` distinguishable houses. This is the
/// combinatorial-number-system coefficient used both by the perfect hash
/// (§4.2), which walks `n` up to `SEED_COUNT`, and by the endgame-table
/// indexer (§4.6), which only ever needs small `n`. The spec's "15x12"
/// sizing describes the latter, narrower use; a single table sized for the
/// former covers both call sites, so only one table is built. See
/// DESIGN.md for the full reasoning.
pub type BinomialTable = Vec<Vec<u64>>;

lazy_static! {
    pub static ref REAPER: ReaperTable = compute_reaper_table();
    pub static ref BINOMIAL: BinomialTable = compute_binomial_table();
}

fn compute_reaper_table() -> ReaperTable {
    (0..BOARD_SIZE)
        .map(|from| {
            (0..=SEED_COUNT)
                .map(|seeds| landing_house(from, seeds))
                .collect()
        })
        .collect()
}

fn landing_house(from: usize, seeds: u32) -> i32 {
    if seeds == 0 {
        return -1;
    }

    let mut house = from;
    let mut remaining = seeds;
    while remaining > 0 {
        house = (house + 1) % BOARD_SIZE;
        if house == from {
            continue;
        }
        remaining -= 1;
    }

    house as i32
}

/// Rows span every running seed count the hash can accumulate
/// (`0..=SEED_COUNT`), plus slack so the final row's `C(n + i, i)` lookups
/// with `i` up to `POSITION_SIZE - 1` never run past the end of a row.
fn compute_binomial_table() -> BinomialTable {
    let rows = SEED_COUNT as usize + POSITION_SIZE + 1;
    let cols = POSITION_SIZE;

    let mut table = vec![vec![0u64; cols]; rows];
    for (n, row) in table.iter_mut().enumerate() {
        for (i, cell) in row.iter_mut().enumerate() {
            *cell = choose((n + i) as u64, i as u64);
        }
    }

    table
}

/// `C(n, k)`, the number of ways to choose `k` items out of `n`. Exposed
/// directly (in addition to the precomputed [`BINOMIAL`] table) because the
/// perfect hash's combinadic decode (`hash::unrank`) needs `C(c, i)` for
/// arbitrary `c`, not just `C(n + i, i)`.
pub fn choose(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }

    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }

    result as u64
}
