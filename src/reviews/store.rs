//! Review Store
//!
//! Durable review collection, queried by product and ordered newest first.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::Review;
use crate::error::{Result, ReviewError};

// == Review Store Trait ==
/// Persistence collaborator for reviews.
///
/// Implementations signal connectivity loss as
/// [`ReviewError::StoreUnavailable`] and never persist partial writes.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persists a validated review.
    async fn insert(&self, review: Review) -> Result<()>;

    /// Returns every review for `product_id`, newest `created_at` first.
    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Review>>;
}

// == In-Memory Store ==
/// Process-local review store.
#[derive(Debug)]
pub struct InMemoryReviewStore {
    /// Reviews in insertion order
    reviews: RwLock<Vec<Review>>,
    connected: AtomicBool,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(Vec::new()),
            connected: AtomicBool::new(true),
        }
    }

    /// A store whose backing connection was never established.
    pub fn disconnected() -> Self {
        let store = Self::new();
        store.set_connected(false);
        store
    }

    /// Simulates losing or regaining the backing connection.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(ReviewError::StoreUnavailable(
                "database connection error".to_string(),
            ))
        }
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn insert(&self, review: Review) -> Result<()> {
        self.ensure_connected()?;
        debug!("Storing review for product {}", review.product_id);
        self.reviews.write().await.push(review);
        Ok(())
    }

    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Review>> {
        self.ensure_connected()?;

        // Walk newest insertion first so the stable sort breaks timestamp ties
        // in favour of the later insert.
        let mut found: Vec<Review> = self
            .reviews
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn review(product_id: &str, text: &str, age_secs: i64) -> Review {
        Review {
            product_id: product_id.to_string(),
            reviewer_name: "r".to_string(),
            rating: 4,
            text: text.to_string(),
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[tokio::test]
    async fn test_find_by_product_newest_first() {
        let store = InMemoryReviewStore::new();
        store.insert(review("P1", "newest", 0)).await.unwrap();
        store.insert(review("P1", "oldest", 100)).await.unwrap();
        store.insert(review("P2", "other", 0)).await.unwrap();
        store.insert(review("P1", "middle", 50)).await.unwrap();

        let texts: Vec<_> = store
            .find_by_product("P1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_latest_insert_first() {
        let store = InMemoryReviewStore::new();
        let first = review("P1", "first", 0);
        let mut second = first.clone();
        second.text = "second".to_string();

        store.insert(first).await.unwrap();
        store.insert(second).await.unwrap();

        let found = store.find_by_product("P1").await.unwrap();
        assert_eq!(found[0].text, "second");
    }

    #[tokio::test]
    async fn test_disconnected_store_rejects() {
        let store = InMemoryReviewStore::disconnected();

        assert!(matches!(
            store.insert(review("P1", "x", 0)).await,
            Err(ReviewError::StoreUnavailable(_))
        ));
        assert!(matches!(
            store.find_by_product("P1").await,
            Err(ReviewError::StoreUnavailable(_))
        ));

        store.set_connected(true);
        assert!(store.find_by_product("P1").await.unwrap().is_empty());
    }
}
