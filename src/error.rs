//! Error types for the review service
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Summarizer Error Enum ==
/// Failure of the external summarization capability.
///
/// Cloneable so a single failure can be handed to every caller that joined
/// the same in-flight computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizerError {
    /// Credential rejected by the upstream
    #[error("summarizer authentication failed")]
    Auth,

    /// Upstream quota or rate limit exhausted
    #[error("summarizer quota exceeded")]
    Quota,

    /// Call did not finish within the configured bound
    #[error("summarizer timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream answered with something we could not use
    #[error("malformed summarizer response: {0}")]
    Malformed(String),

    /// Transport failure or unexpected upstream status
    #[error("summarizer upstream error: {0}")]
    Upstream(String),

    /// The computation owner went away before publishing a result
    #[error("summary computation abandoned")]
    Abandoned,
}

// == Review Error Enum ==
/// Unified error type for the review service.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Missing or out-of-range required field
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Review store unreachable
    #[error("Review store unavailable: {0}")]
    StoreUnavailable(String),

    /// Summary generation failed
    #[error(transparent)]
    Summarizer(#[from] SummarizerError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReviewError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ReviewError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ReviewError::Summarizer(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the review service.
pub type Result<T> = std::result::Result<T, ReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ReviewError::InvalidArgument("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ReviewError::StoreUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ReviewError::from(SummarizerError::Quota),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_summarizer_error_display_is_transparent() {
        let err = ReviewError::from(SummarizerError::Timeout(Duration::from_secs(2)));
        assert_eq!(err.to_string(), "summarizer timed out after 2s");
    }
}
