//! Cache Statistics Module
//!
//! Counts how summary lookups were resolved.

use serde::Serialize;

// == Cache Stats ==
/// Summary cache counters.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from a fresh entry
    pub hits: u64,
    /// Lookups that waited on another caller's computation
    pub joins: u64,
    /// Lookups that ran the summarizer themselves
    pub misses: u64,
    /// Computations that failed or timed out
    pub failures: u64,
    /// Entries evicted by the capacity policy
    pub evictions: u64,
    /// Current number of stored entries (including not yet purged expired ones)
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of lookups that did not run the summarizer.
    ///
    /// Returns (hits + joins) / (hits + joins + misses), or 0.0 if idle.
    pub fn hit_rate(&self) -> f64 {
        let served = self.hits + self.joins;
        let total = served + self.misses;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_join(&mut self) {
        self.joins += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
