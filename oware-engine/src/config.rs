//! Plain, explicitly constructed configuration structs. The teacher's
//! `uci.rs` takes search parameters as explicit function arguments read off
//! the UCI command line rather than a config-file format; this crate has no
//! UCI layer, so the same parameters are grouped into `SearchLimits`
//! instead, still `Default`-able rather than loaded from a file.

use std::time::Duration;

/// Bounds on one search: missing fields mean "unbounded" for that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    pub max_depth: Option<u32>,
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    pub fn depth(max_depth: u32) -> Self {
        Self { max_depth: Some(max_depth), move_time: None }
    }

    pub fn time(move_time: Duration) -> Self {
        Self { max_depth: None, move_time: Some(move_time) }
    }
}

/// The source evaluation's draw-contempt default. A negative contempt
/// means the engine would rather avoid a repetition draw than settle for
/// one; kept as a named tunable rather than hardcoded inline, per the
/// spec's Open Question note.
pub const DEFAULT_CONTEMPT: i32 = -9;

/// How the search should be biased toward or against repetition draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub contempt: i32,
    pub cache_bytes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { contempt: DEFAULT_CONTEMPT, cache_bytes: 32 * 1024 * 1024 }
    }
}

/// Paths to the two optional database files. Either may be `None`, in
/// which case the search runs with that collaborator's no-op fallback
/// (see `oware_engine::search`'s `Leaves`/`Roots` traits).
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub opening_book_path: Option<std::path::PathBuf>,
    pub endgame_table_path: Option<std::path::PathBuf>,
}
