//! Request and Response models for the review service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ProductQuery, SaveReviewRequest, SearchQuery};
pub use responses::{
    ErrorResponse, GetReviewsResponse, HealthResponse, SaveReviewResponse, SearchResponse,
    StatsResponse,
};
