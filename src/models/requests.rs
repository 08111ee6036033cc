//! Request DTOs for the review service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::reviews::NewReview;

/// Request body for POST /save_review
///
/// Missing fields deserialize to empty values so that validation reports
/// them as invalid arguments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaveReviewRequest {
    pub product_id: String,
    pub reviewer_name: String,
    pub rating: i64,
    pub text: String,
}

impl From<SaveReviewRequest> for NewReview {
    fn from(req: SaveReviewRequest) -> Self {
        NewReview {
            product_id: req.product_id,
            reviewer_name: req.reviewer_name,
            rating: req.rating,
            text: req.text,
        }
    }
}

/// Query string for GET /get_reviews
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub product_id: String,
}

/// Query string for GET /search_words_reviews
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub product_id: String,
    pub term: String,
}
