//! Review Digest - product reviews with cached natural-language summaries
//!
//! Binary entry point: wires configuration, the review store, the
//! summarizer and the summary cache into the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_digest::api::create_router;
use review_digest::{spawn_cleanup_task, AppState, Config, GeminiSummarizer, InMemoryReviewStore};

/// Main entry point for the review service.
///
/// # Startup Sequence
/// 1. Load `.env` and initialize the tracing subscriber
/// 2. Load configuration from environment variables
/// 3. Build the summarizer client (requires `API_KEY`)
/// 4. Create the review store and summary cache
/// 5. Start the background summary sweep
/// 6. Serve HTTP until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_digest=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Review Digest server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_max_entries={}, cache_ttl={}s, excerpt_cap={}, summarizer_timeout={}s, port={}",
        config.cache_max_entries,
        config.cache_ttl,
        config.excerpt_cap,
        config.summarizer_timeout,
        config.server_port
    );

    let summarizer = GeminiSummarizer::from_config(&config)
        .ok_or_else(|| anyhow!("API_KEY must be set to enable review summaries"))?
        .context("failed to build summarizer client")?;
    info!("Summarizer ready: {:?}", summarizer);

    let store = Arc::new(InMemoryReviewStore::new());
    let state = AppState::from_config(&config, store, Arc::new(summarizer));
    info!("Summary cache initialized");

    let sweep_handle = spawn_cleanup_task(
        state.cache(),
        Duration::from_secs(config.cleanup_interval.max(1)),
    );

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweep_handle.abort();
    warn!("Summary sweep aborted");
}
