//! Fixed-capacity transposition cache (component E, §4.7).
//!
//! Grounded on the teacher's `TranspositionTable`/`TranspositionBucket`
//! pair in `searcher.rs`, but collapsed from an 8-way bucketed,
//! `RwLock`-sharded table down to one slot per index with an
//! unconditional overwrite: the spec is explicit that the replacement
//! policy is "always by slot (no chaining)" and that the search runs on a
//! single thread (§5), so the teacher's collision chain and its
//! `TranspositionTableAccess` sharding (built to cut lock contention across
//! Lazy-SMP worker threads) have no remaining purpose here. See DESIGN.md
//! for the drop.

use oware_core::{Hash, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Exact,
    Lower,
    Upper,
    Empty,
}

#[derive(Debug, Clone, Copy)]
pub struct CacheEntry {
    pub hash: Hash,
    pub best_move: Move,
    pub score: i32,
    pub depth: u32,
    pub flag: Flag,
}

impl CacheEntry {
    const EMPTY: Self = Self {
        hash: 0,
        best_move: Move::NULL,
        score: 0,
        depth: 0,
        flag: Flag::Empty,
    };
}

/// One slot per `hash % capacity`. `find` caches the matching slot index so
/// the `get_*` accessors don't each re-hash.
pub struct TranspositionCache {
    slots: Vec<CacheEntry>,
    current: Option<usize>,
}

impl TranspositionCache {
    /// Sizes the table so its slots fit within `bytes`, rounding down but
    /// never below one slot.
    pub fn with_bytes(bytes: usize) -> Self {
        let slot_size = std::mem::size_of::<CacheEntry>();
        let capacity = (bytes / slot_size).max(1);
        Self { slots: vec![CacheEntry::EMPTY; capacity], current: None }
    }

    fn index(&self, hash: Hash) -> usize {
        (hash as usize) % self.slots.len()
    }

    /// Looks up `hash`, remembering the slot for the `get_*` accessors.
    /// Returns whether a live entry for exactly this hash was found.
    pub fn find(&mut self, hash: Hash) -> bool {
        let index = self.index(hash);
        let hit = self.slots[index].flag != Flag::Empty && self.slots[index].hash == hash;
        self.current = hit.then_some(index);
        hit
    }

    fn current_entry(&self) -> &CacheEntry {
        &self.slots[self.current.expect("get_* called without a preceding successful find")]
    }

    pub fn get_score(&self) -> i32 {
        self.current_entry().score
    }

    pub fn get_move(&self) -> Move {
        self.current_entry().best_move
    }

    pub fn get_depth(&self) -> u32 {
        self.current_entry().depth
    }

    pub fn get_flag(&self) -> Flag {
        self.current_entry().flag
    }

    /// Inserts or overwrites the slot for `hash`, unconditionally.
    pub fn store(&mut self, hash: Hash, best_move: Move, score: i32, depth: u32, flag: Flag) {
        let index = self.index(hash);
        self.slots[index] = CacheEntry { hash, best_move, score, depth, flag };
    }

    pub fn clear(&mut self) {
        self.slots.fill(CacheEntry::EMPTY);
        self.current = None;
    }

    pub fn resize(&mut self, bytes: usize) {
        *self = Self::with_bytes(bytes);
    }

    /// Periodic ageing hook (§4.7). The chosen policy is a full clear: with
    /// a single always-replace slot per index there's no per-entry age
    /// counter to decay, so ageing and clearing coincide. Called by the
    /// search between matches, never mid-search.
    pub fn discharge(&mut self) {
        self.clear();
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|e| e.flag != Flag::Empty).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
