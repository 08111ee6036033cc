//! Cache Store Module
//!
//! Bounded summary storage combining HashMap entries with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, LruTracker};

// == Cache Store ==
/// Product id → summary storage with LRU eviction and a single TTL.
///
/// Not synchronized; [`SummaryCache`](crate::cache::SummaryCache) owns it
/// behind a mutex.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Age at which an entry stops being served
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries,
            ttl,
        }
    }

    // == Insert ==
    /// Stores a summary, stamping it with the current instant.
    ///
    /// Overwriting an existing key never evicts. Otherwise, when the store is
    /// at capacity the least recently used entry is evicted first and its key
    /// is returned. A store with zero capacity keeps nothing.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        if self.max_entries == 0 {
            return None;
        }

        let mut evicted = None;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.lru.evict_oldest() {
                self.entries.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value));
        evicted
    }

    // == Get ==
    /// Returns the summary for `key` if present and fresh.
    ///
    /// A hit marks the key most recently used. An expired entry is purged
    /// and treated as absent.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(self.ttl) {
            self.remove(key);
            return None;
        }

        let value = entry.value.clone();
        self.lru.touch(key);
        Some(value)
    }

    // == Remove ==
    /// Drops the entry for `key`, returning whether one existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }

    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
