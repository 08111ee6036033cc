//! Cache Module
//!
//! Provides the product summary cache: TTL expiration, LRU eviction and
//! single-flight regeneration.

mod entry;
mod lru;
mod stats;
mod store;
mod summary;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use summary::{CacheOutcome, SummaryCache};
