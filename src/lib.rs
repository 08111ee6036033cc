//! Review Digest - product reviews with cached natural-language summaries
//!
//! Serves review lists with an average rating and a summary of recent
//! review text. Summaries are cached per product with TTL expiration, LRU
//! eviction and single-flight regeneration.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod reviews;
pub mod summarizer;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheOutcome, SummaryCache};
pub use config::Config;
pub use error::{Result, ReviewError, SummarizerError};
pub use reviews::{InMemoryReviewStore, ReviewService, ReviewStore};
pub use summarizer::{GeminiSummarizer, Summarizer};
pub use tasks::spawn_cleanup_task;
