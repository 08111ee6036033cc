//! Expired Summary Sweep
//!
//! Background task that periodically drops expired summaries. Lookups
//! already ignore expired entries; the sweep only reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SummaryCache;

/// Spawns a background task that purges expired summaries every `interval`.
///
/// Returns a JoinHandle so the task can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(SummaryCache::new(100, ttl, timeout));
/// let sweep = spawn_cleanup_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<SummaryCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting summary sweep with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();
            if removed > 0 {
                info!("Summary sweep: removed {} expired entries", removed);
            } else {
                debug!("Summary sweep: no expired entries found");
            }
        }
    })
}
