//! Average rating over a product's reviews.

use serde::Serialize;

use super::Review;

/// Per-request rating aggregate; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateView {
    /// Mean rating rounded to two decimals, 0 when there are no reviews
    pub average_rating: f64,
    pub review_count: usize,
}

/// Computes the mean rating of `reviews`, rounded to two decimal places.
pub fn aggregate(reviews: &[Review]) -> AggregateView {
    if reviews.is_empty() {
        return AggregateView {
            average_rating: 0.0,
            review_count: 0,
        };
    }

    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    let mean = sum as f64 / reviews.len() as f64;

    AggregateView {
        average_rating: round2(mean),
        review_count: reviews.len(),
    }
}

/// Rounds to two decimals, halves to the even neighbour (4.125 -> 4.12).
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
