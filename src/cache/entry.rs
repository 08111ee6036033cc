//! Cache Entry Module
//!
//! A generated summary together with the instant it was stored.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached product summary.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The generated summary text
    pub value: String,
    /// When the summary was stored
    pub inserted_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: String) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is expired once `now - inserted_at >= ttl`,
    /// so a zero TTL expires immediately.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}
