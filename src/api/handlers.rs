//! API Handlers
//!
//! HTTP request handlers for each review service endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::SummaryCache;
use crate::config::Config;
use crate::error::{Result, ReviewError};
use crate::models::{
    GetReviewsResponse, HealthResponse, ProductQuery, SaveReviewRequest, SaveReviewResponse,
    SearchQuery, SearchResponse, StatsResponse,
};
use crate::reviews::{ReviewService, ReviewStore};
use crate::summarizer::Summarizer;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: ReviewService,
}

impl AppState {
    /// Creates a new AppState around an assembled service.
    pub fn new(service: ReviewService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the summary cache with the configured capacity, TTL and
    /// summarizer timeout.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn ReviewStore>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let cache = Arc::new(SummaryCache::new(
            config.cache_max_entries,
            config.ttl(),
            config.summarizer_timeout(),
        ));
        Self::new(ReviewService::new(
            store,
            summarizer,
            cache,
            config.excerpt_cap,
        ))
    }

    /// The shared summary cache.
    pub fn cache(&self) -> Arc<SummaryCache> {
        self.service.cache().clone()
    }
}

/// Handler for POST /save_review
///
/// A body that is not valid JSON for a review is rejected as an invalid
/// argument, like any other validation failure.
pub async fn save_review_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveReviewResponse>)> {
    let Json(req) =
        payload.map_err(|rejection| ReviewError::InvalidArgument(rejection.body_text()))?;
    let review = state.service.save_review(req.into()).await?;
    Ok((StatusCode::CREATED, Json(SaveReviewResponse::new(review))))
}

/// Handler for GET /get_reviews?product_id=
pub async fn get_reviews_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<GetReviewsResponse>> {
    let digest = state.service.get_reviews(&query.product_id).await?;
    Ok(Json(digest.into()))
}

/// Handler for GET /search_words_reviews?product_id=&term=
pub async fn search_reviews_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let reviews = state
        .service
        .search_reviews(&query.product_id, &query.term)
        .await?;
    Ok(Json(SearchResponse { reviews }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache();
    Json(StatsResponse::new(cache.stats(), cache.in_flight()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
