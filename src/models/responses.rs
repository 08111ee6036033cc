//! Response DTOs for the review service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::reviews::{Review, ReviewDigest};

/// Response body for GET /get_reviews
#[derive(Debug, Clone, Serialize)]
pub struct GetReviewsResponse {
    pub summary: String,
    pub average: f64,
    pub review_count: usize,
    pub reviews: Vec<Review>,
}

impl From<ReviewDigest> for GetReviewsResponse {
    fn from(digest: ReviewDigest) -> Self {
        Self {
            summary: digest.summary,
            average: digest.average,
            review_count: digest.review_count,
            reviews: digest.reviews,
        }
    }
}

/// Response body for GET /search_words_reviews
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub reviews: Vec<Review>,
}

/// Response body for POST /save_review
#[derive(Debug, Clone, Serialize)]
pub struct SaveReviewResponse {
    pub message: String,
    pub review: Review,
}

impl SaveReviewResponse {
    pub fn new(review: Review) -> Self {
        Self {
            message: "Review saved successfully".to_string(),
            review,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub joins: u64,
    pub misses: u64,
    pub failures: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub in_flight: usize,
    /// (hits + joins) / (hits + joins + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, in_flight: usize) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            joins: stats.joins,
            misses: stats.misses,
            failures: stats.failures,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            in_flight,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
