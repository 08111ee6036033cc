//! Review Query Service
//!
//! Composes the review store, the aggregator and the summary cache into the
//! externally visible read path, plus review ingestion and text search.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::{aggregate, NewReview, Review, ReviewStore};
use crate::cache::SummaryCache;
use crate::error::{Result, ReviewError};
use crate::summarizer::Summarizer;

/// Summary reported for a product without reviews.
pub const NO_SUMMARY: &str = "no summary available";

/// Default number of most recent reviews sent to the summarizer.
pub const DEFAULT_EXCERPT_CAP: usize = 20;

// == Review Digest ==
/// Result of the read path for one product.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDigest {
    pub summary: String,
    pub average: f64,
    pub review_count: usize,
    /// Newest first
    pub reviews: Vec<Review>,
    /// Whether the summary came from the cache rather than a fresh call
    #[serde(skip)]
    pub summary_cached: bool,
}

impl ReviewDigest {
    fn empty() -> Self {
        Self {
            summary: NO_SUMMARY.to_string(),
            average: 0.0,
            review_count: 0,
            reviews: Vec::new(),
            summary_cached: false,
        }
    }
}

// == Review Service ==
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn ReviewStore>,
    summarizer: Arc<dyn Summarizer>,
    cache: Arc<SummaryCache>,
    excerpt_cap: usize,
}

impl ReviewService {
    pub fn new(
        store: Arc<dyn ReviewStore>,
        summarizer: Arc<dyn Summarizer>,
        cache: Arc<SummaryCache>,
        excerpt_cap: usize,
    ) -> Self {
        Self {
            store,
            summarizer,
            cache,
            excerpt_cap,
        }
    }

    /// Shared summary cache.
    pub fn cache(&self) -> &Arc<SummaryCache> {
        &self.cache
    }

    // == Save Review ==
    /// Validates and persists a review, stamping it with the current time.
    ///
    /// The cached summary for the product is left alone; it refreshes on TTL.
    pub async fn save_review(&self, submission: NewReview) -> Result<Review> {
        let review = submission.validate(Utc::now())?;
        self.store.insert(review.clone()).await?;
        info!(
            "Saved review for product {} (rating {})",
            review.product_id, review.rating
        );
        Ok(review)
    }

    // == Get Reviews ==
    /// Returns the product's reviews newest first, their average rating and
    /// a summary of the most recent ones.
    ///
    /// A product without reviews gets [`NO_SUMMARY`] without consulting the
    /// cache or the summarizer.
    pub async fn get_reviews(&self, product_id: &str) -> Result<ReviewDigest> {
        require_arg("product_id", product_id)?;

        let reviews = self.store.find_by_product(product_id).await?;
        if reviews.is_empty() {
            debug!("No reviews for product {}", product_id);
            return Ok(ReviewDigest::empty());
        }

        let view = aggregate(&reviews);
        let excerpt = select_excerpt(&reviews, self.excerpt_cap);
        let summarizer = self.summarizer.clone();

        let (summary, outcome) = self
            .cache
            .get_or_compute(product_id, || async move {
                summarizer.summarize(&excerpt).await
            })
            .await?;

        debug!(
            "Resolved summary for product {} ({:?}, {} reviews)",
            product_id, outcome, view.review_count
        );

        Ok(ReviewDigest {
            summary,
            average: view.average_rating,
            review_count: view.review_count,
            reviews,
            summary_cached: outcome.was_cache_hit(),
        })
    }

    // == Search Reviews ==
    /// Returns the product's reviews whose text contains `term`, ignoring
    /// letter case, newest first.
    pub async fn search_reviews(&self, product_id: &str, term: &str) -> Result<Vec<Review>> {
        require_arg("product_id", product_id)?;
        require_arg("term", term)?;

        let reviews = self.store.find_by_product(product_id).await?;
        Ok(filter_by_term(reviews, term))
    }
}

impl std::fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewService")
            .field("summarizer", &self.summarizer.name())
            .field("excerpt_cap", &self.excerpt_cap)
            .finish_non_exhaustive()
    }
}

/// Texts of at most the first `cap` reviews, in the order given.
pub fn select_excerpt(reviews: &[Review], cap: usize) -> Vec<String> {
    reviews.iter().take(cap).map(|r| r.text.clone()).collect()
}

/// Keeps the reviews whose text contains `term`, case-insensitively.
pub fn filter_by_term(reviews: Vec<Review>, term: &str) -> Vec<Review> {
    let needle = term.to_lowercase();
    reviews
        .into_iter()
        .filter(|r| r.text.to_lowercase().contains(&needle))
        .collect()
}

fn require_arg(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ReviewError::InvalidArgument(format!(
            "{} is required",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use crate::error::SummarizerError;
    use crate::reviews::InMemoryReviewStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Counts calls and remembers the last excerpt it was given.
    #[derive(Default)]
    struct RecordingSummarizer {
        calls: AtomicUsize,
        last_excerpt: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        fn name(&self) -> &str {
            "recording"
        }

        async fn summarize(&self, excerpt: &[String]) -> std::result::Result<String, SummarizerError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            *self.last_excerpt.lock().unwrap() = excerpt.to_vec();
            if self.fail {
                return Err(SummarizerError::Quota);
            }
            Ok(format!("summary #{} of {} reviews", n, excerpt.len()))
        }
    }

    fn service_with(summarizer: Arc<RecordingSummarizer>) -> (ReviewService, Arc<InMemoryReviewStore>) {
        let store = Arc::new(InMemoryReviewStore::new());
        let cache = Arc::new(SummaryCache::new(
            100,
            Duration::from_secs(3600),
            Duration::from_secs(5),
        ));
        let service = ReviewService::new(store.clone(), summarizer, cache, DEFAULT_EXCERPT_CAP);
        (service, store)
    }

    fn submission(product_id: &str, rating: i64, text: &str) -> NewReview {
        NewReview {
            product_id: product_id.to_string(),
            reviewer_name: "tester".to_string(),
            rating,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_reviews_scenario() {
        let summarizer = Arc::new(RecordingSummarizer::default());
        let (service, _) = service_with(summarizer.clone());

        service.save_review(submission("P1", 5, "Loved it")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        service.save_review(submission("P1", 3, "It was okay")).await.unwrap();

        let digest = service.get_reviews("P1").await.unwrap();
        assert_eq!(digest.average, 4.0);
        assert_eq!(digest.review_count, 2);
        assert_eq!(digest.reviews[0].text, "It was okay");
        assert_eq!(digest.reviews[1].text, "Loved it");
        assert!(!digest.summary_cached);
        assert_eq!(
            *summarizer.last_excerpt.lock().unwrap(),
            vec!["It was okay".to_string(), "Loved it".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unknown_product_skips_summarizer() {
        let summarizer = Arc::new(RecordingSummarizer::default());
        let (service, _) = service_with(summarizer.clone());

        let digest = service.get_reviews("nonexistent").await.unwrap();
        assert_eq!(digest.summary, NO_SUMMARY);
        assert_eq!(digest.average, 0.0);
        assert!(digest.reviews.is_empty());
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.cache().stats(), CacheStats::default());
    }

    #[tokio::test]
    async fn test_second_read_is_cached() {
        let summarizer = Arc::new(RecordingSummarizer::default());
        let (service, _) = service_with(summarizer.clone());
        service.save_review(submission("P1", 4, "Solid")).await.unwrap();

        let first = service.get_reviews("P1").await.unwrap();
        let second = service.get_reviews("P1").await.unwrap();

        assert_eq!(first.summary, second.summary);
        assert!(second.summary_cached);
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_excerpt_capped_to_most_recent() {
        let summarizer = Arc::new(RecordingSummarizer::default());
        let (service, _) = service_with(summarizer.clone());
        for i in 0..25 {
            service
                .save_review(submission("P1", 4, &format!("review {}", i)))
                .await
                .unwrap();
        }

        let digest = service.get_reviews("P1").await.unwrap();
        assert_eq!(digest.review_count, 25);

        let excerpt = summarizer.last_excerpt.lock().unwrap().clone();
        assert_eq!(excerpt.len(), DEFAULT_EXCERPT_CAP);
        assert_eq!(excerpt[0], digest.reviews[0].text);
        assert!(!excerpt.contains(&digest.reviews[24].text));
    }

    #[tokio::test]
    async fn test_summarizer_failure_surfaces_and_retries() {
        let failing = Arc::new(RecordingSummarizer {
            fail: true,
            ..Default::default()
        });
        let (service, store) = service_with(failing);
        service.save_review(submission("P1", 2, "Meh")).await.unwrap();

        let err = service.get_reviews("P1").await.unwrap_err();
        assert!(matches!(err, ReviewError::Summarizer(SummarizerError::Quota)));

        // Same cache, working summarizer: the failure was not cached.
        let working = Arc::new(RecordingSummarizer::default());
        let retry = ReviewService::new(store, working.clone(), service.cache().clone(), DEFAULT_EXCERPT_CAP);
        let digest = retry.get_reviews("P1").await.unwrap();
        assert_eq!(digest.summary, "summary #1 of 1 reviews");
    }

    #[tokio::test]
    async fn test_search_reviews_case_insensitive() {
        let summarizer = Arc::new(RecordingSummarizer::default());
        let (service, _) = service_with(summarizer.clone());
        service.save_review(submission("P1", 5, "Great product!")).await.unwrap();
        service.save_review(submission("P1", 2, "not great")).await.unwrap();
        service.save_review(submission("P1", 3, "average")).await.unwrap();
        service.save_review(submission("P2", 5, "great too")).await.unwrap();

        let found = service.search_reviews("P1", "Great").await.unwrap();
        let texts: Vec<_> = found.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.contains(&"Great product!"));
        assert!(texts.contains(&"not great"));
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_arguments_rejected() {
        let (service, _) = service_with(Arc::new(RecordingSummarizer::default()));

        assert!(matches!(
            service.get_reviews("").await,
            Err(ReviewError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.search_reviews("P1", "").await,
            Err(ReviewError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.search_reviews("", "great").await,
            Err(ReviewError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_review_not_stored() {
        let (service, store) = service_with(Arc::new(RecordingSummarizer::default()));

        let err = service.save_review(submission("P1", 9, "Too good")).await.unwrap_err();
        assert!(matches!(err, ReviewError::InvalidArgument(_)));
        assert!(store.find_by_product("P1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_unavailable_surfaces() {
        let store = Arc::new(InMemoryReviewStore::disconnected());
        let cache = Arc::new(SummaryCache::new(10, Duration::from_secs(60), Duration::from_secs(5)));
        let service = ReviewService::new(
            store,
            Arc::new(RecordingSummarizer::default()),
            cache,
            DEFAULT_EXCERPT_CAP,
        );

        assert!(matches!(
            service.get_reviews("P1").await,
            Err(ReviewError::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.save_review(submission("P1", 4, "ok")).await,
            Err(ReviewError::StoreUnavailable(_))
        ));
    }
}
