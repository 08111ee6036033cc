//! Reviews Module
//!
//! Review records, their store, the rating aggregator and the query service.

mod aggregator;
mod model;
mod service;
mod store;

pub use aggregator::{aggregate, AggregateView};
pub use model::{NewReview, Review, MAX_RATING, MIN_RATING};
pub use service::{
    filter_by_term, select_excerpt, ReviewDigest, ReviewService, DEFAULT_EXCERPT_CAP, NO_SUMMARY,
};
pub use store::{InMemoryReviewStore, ReviewStore};
