//! Summary Cache Module
//!
//! TTL + LRU cache of generated product summaries with single-flight
//! regeneration per product key.
//!
//! At most one computation per key is ever in flight. Callers that miss
//! while a computation is running subscribe to its `watch` channel and
//! receive the same result, success or failure. The long-running compute
//! future is awaited outside the mutex; only map lookups and updates happen
//! under it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::SummarizerError;

type FlightResult = Result<String, SummarizerError>;

// == Cache Outcome ==
/// How a [`SummaryCache::get_or_compute`] call was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Served from a fresh entry
    Hit,
    /// Shared the result of a computation started by another caller
    Joined,
    /// This caller ran the computation
    Computed,
}

impl CacheOutcome {
    pub fn was_cache_hit(self) -> bool {
        !matches!(self, CacheOutcome::Computed)
    }
}

/// A computation currently running for one key.
struct Flight {
    id: u64,
    rx: watch::Receiver<Option<FlightResult>>,
}

struct Inner {
    store: CacheStore,
    in_flight: HashMap<String, Flight>,
    stats: CacheStats,
}

impl Inner {
    /// Clears the in-flight marker for `key` if it still belongs to flight `id`.
    fn release(&mut self, key: &str, id: u64) {
        if self.in_flight.get(key).is_some_and(|f| f.id == id) {
            self.in_flight.remove(key);
        }
    }
}

enum Role {
    Owner(watch::Sender<Option<FlightResult>>, u64),
    Waiter(watch::Receiver<Option<FlightResult>>),
}

// == Summary Cache ==
/// Shared summary cache, constructed once at startup and handed to the
/// query service.
pub struct SummaryCache {
    inner: Mutex<Inner>,
    compute_timeout: Duration,
    next_flight: AtomicU64,
}

impl SummaryCache {
    // == Constructor ==
    /// Creates a cache holding at most `max_entries` summaries for `ttl`,
    /// bounding every computation by `compute_timeout`.
    pub fn new(max_entries: usize, ttl: Duration, compute_timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                store: CacheStore::new(max_entries, ttl),
                in_flight: HashMap::new(),
                stats: CacheStats::new(),
            }),
            compute_timeout,
            next_flight: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Critical sections never panic midway; a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get Or Compute ==
    /// Returns the cached summary for `key`, or produces it with `compute`.
    ///
    /// - A fresh entry is returned immediately as [`CacheOutcome::Hit`].
    /// - If another caller is already computing `key`, waits for that
    ///   result ([`CacheOutcome::Joined`]) instead of starting a second one.
    /// - Otherwise runs `compute` under `compute_timeout`. Success is stored
    ///   and shared with joined waiters; failure is shared with them too but
    ///   never stored, so the next call retries.
    ///
    /// The in-flight marker is released on every exit path, including when
    /// this future is dropped mid-computation.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        compute: F,
    ) -> Result<(String, CacheOutcome), SummarizerError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FlightResult>,
    {
        let role = {
            let mut inner = self.lock();
            if let Some(value) = inner.store.get(key) {
                inner.stats.record_hit();
                debug!(key, "summary cache hit");
                return Ok((value, CacheOutcome::Hit));
            }

            let running = inner.in_flight.get(key).map(|f| f.rx.clone());
            match running {
                Some(rx) => {
                    inner.stats.record_join();
                    Role::Waiter(rx)
                }
                None => {
                    let id = self.next_flight.fetch_add(1, Ordering::Relaxed);
                    let (tx, rx) = watch::channel(None);
                    inner.in_flight.insert(key.to_string(), Flight { id, rx });
                    inner.stats.record_miss();
                    Role::Owner(tx, id)
                }
            }
        };

        match role {
            Role::Waiter(rx) => {
                debug!(key, "joining in-flight summary computation");
                Self::wait(rx).await.map(|value| (value, CacheOutcome::Joined))
            }
            Role::Owner(tx, id) => {
                let result = self.run_owned(key, id, compute).await;
                // Receivers may all be gone; nothing to report then.
                let _ = tx.send(Some(result.clone()));
                result.map(|value| (value, CacheOutcome::Computed))
            }
        }
    }

    async fn run_owned<F, Fut>(&self, key: &str, id: u64, compute: F) -> FlightResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FlightResult>,
    {
        let guard = FlightGuard { cache: self, key, id };

        debug!(key, "computing summary");
        let result = match tokio::time::timeout(self.compute_timeout, compute()).await {
            Ok(result) => result,
            Err(_) => Err(SummarizerError::Timeout(self.compute_timeout)),
        };

        {
            let mut inner = self.lock();
            match &result {
                Ok(value) => {
                    if let Some(evicted) = inner.store.insert(key.to_string(), value.clone()) {
                        inner.stats.record_eviction();
                        debug!(key = %evicted, "evicted least recently used summary");
                    }
                }
                Err(err) => {
                    inner.stats.record_failure();
                    warn!(key, error = %err, "summary computation failed");
                }
            }
            inner.release(key, id);
        }
        drop(guard);

        result
    }

    async fn wait(mut rx: watch::Receiver<Option<FlightResult>>) -> FlightResult {
        match rx.wait_for(Option::is_some).await {
            Ok(slot) => slot.clone().unwrap_or(Err(SummarizerError::Abandoned)),
            // Owner dropped without publishing
            Err(_) => Err(SummarizerError::Abandoned),
        }
    }

    // == Invalidate ==
    /// Drops any stored summary for `key`. An in-flight computation is
    /// unaffected and will still store its result.
    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().store.remove(key)
    }

    // == Purge Expired ==
    /// Removes expired summaries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.lock().store.purge_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.store.len();
        stats
    }

    /// Number of keys with a computation currently running.
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }
}

impl std::fmt::Debug for SummaryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryCache")
            .field("compute_timeout", &self.compute_timeout)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Releases the in-flight marker if the owning future is dropped early.
struct FlightGuard<'a> {
    cache: &'a SummaryCache,
    key: &'a str,
    id: u64,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.cache.lock();
        if inner.in_flight.get(self.key).is_some_and(|f| f.id == self.id) {
            info!(key = self.key, "summary computation cancelled, releasing slot");
            inner.release(self.key, self.id);
        }
    }
}
