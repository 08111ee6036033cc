//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default endpoint for the generative language API
pub const DEFAULT_SUMMARIZER_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generative model used for review summaries
pub const DEFAULT_SUMMARIZER_MODEL: &str = "gemini-1.5-flash";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Summary TTL in seconds
    pub cache_ttl: u64,
    /// Maximum number of product summaries the cache can hold
    pub cache_max_entries: usize,
    /// Maximum number of review texts handed to the summarizer
    pub excerpt_cap: usize,
    /// Upper bound on a single summarizer call, in seconds
    pub summarizer_timeout: u64,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Summarizer credential
    pub api_key: Option<String>,
    /// Generative model name
    pub summarizer_model: String,
    /// Summarizer endpoint base URL
    pub summarizer_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Summary TTL in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached summaries (default: 100)
    /// - `EXCERPT_CAP` - Reviews sent to the summarizer (default: 20)
    /// - `SUMMARIZER_TIMEOUT` - Summarizer bound in seconds (default: 30)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `API_KEY` - Summarizer credential (no default)
    /// - `SUMMARIZER_MODEL` - Model name (default: gemini-1.5-flash)
    /// - `SUMMARIZER_BASE_URL` - Endpoint base URL
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            excerpt_cap: parse_var("EXCERPT_CAP").unwrap_or(defaults.excerpt_cap),
            summarizer_timeout: parse_var("SUMMARIZER_TIMEOUT")
                .unwrap_or(defaults.summarizer_timeout),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            api_key: env::var("API_KEY").ok().filter(|v| !v.is_empty()),
            summarizer_model: env::var("SUMMARIZER_MODEL")
                .unwrap_or(defaults.summarizer_model),
            summarizer_base_url: env::var("SUMMARIZER_BASE_URL")
                .unwrap_or(defaults.summarizer_base_url),
        }
    }

    /// Summary TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Summarizer timeout as a Duration, never shorter than one second.
    pub fn summarizer_timeout(&self) -> Duration {
        Duration::from_secs(self.summarizer_timeout.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 3600,
            cache_max_entries: 100,
            excerpt_cap: 20,
            summarizer_timeout: 30,
            cleanup_interval: 60,
            server_port: 3000,
            api_key: None,
            summarizer_model: DEFAULT_SUMMARIZER_MODEL.to_string(),
            summarizer_base_url: DEFAULT_SUMMARIZER_BASE_URL.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_max_entries, 100);
        assert_eq!(config.excerpt_cap, 20);
        assert_eq!(config.summarizer_timeout, 30);
        assert_eq!(config.server_port, 3000);
        assert!(config.api_key.is_none());
        assert_eq!(config.ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("EXCERPT_CAP");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_max_entries, 100);
        assert_eq!(config.excerpt_cap, 20);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_zero_summarizer_timeout_is_clamped() {
        let config = Config {
            summarizer_timeout: 0,
            ..Config::default()
        };
        assert_eq!(config.summarizer_timeout(), Duration::from_secs(1));
        assert_eq!(Config::default().summarizer_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_unparseable_value_falls_back() {
        env::set_var("SUMMARIZER_TIMEOUT", "soon");
        let config = Config::from_env();
        env::remove_var("SUMMARIZER_TIMEOUT");
        assert_eq!(config.summarizer_timeout, 30);
    }
}
