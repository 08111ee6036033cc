//! Review records and ingestion validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ReviewError};

/// Lowest accepted rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating
pub const MAX_RATING: u8 = 5;

// == Review ==
/// A stored review. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub product_id: String,
    pub reviewer_name: String,
    pub rating: u8,
    pub text: String,
    /// Assigned at insertion
    pub created_at: DateTime<Utc>,
}

// == New Review ==
/// Unvalidated review submission.
///
/// `rating` is kept wide so out-of-range input is reported as an invalid
/// argument rather than a decoding failure.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: String,
    pub reviewer_name: String,
    pub rating: i64,
    pub text: String,
}

impl NewReview {
    /// Checks required fields and the rating range, then stamps the review
    /// with `created_at`.
    pub fn validate(self, created_at: DateTime<Utc>) -> Result<Review> {
        require("product_id", &self.product_id)?;
        require("reviewer_name", &self.reviewer_name)?;
        require("text", &self.text)?;

        let rating = u8::try_from(self.rating)
            .ok()
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or_else(|| {
                ReviewError::InvalidArgument(format!(
                    "rating must be between {} and {}, got {}",
                    MIN_RATING, MAX_RATING, self.rating
                ))
            })?;

        Ok(Review {
            product_id: self.product_id,
            reviewer_name: self.reviewer_name,
            rating,
            text: self.text,
            created_at,
        })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReviewError::InvalidArgument(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}
