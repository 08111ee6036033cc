//! API Module
//!
//! HTTP handlers and routing for the review service REST API.
//!
//! # Endpoints
//! - `POST /save_review` - Store a review
//! - `GET /get_reviews?product_id=` - Reviews, average and summary
//! - `GET /search_words_reviews?product_id=&term=` - Search review text
//! - `GET /stats` - Summary cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
