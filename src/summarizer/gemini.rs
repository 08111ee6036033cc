//! Google Generative Language API client used to summarize reviews.
//!
//! See: <https://ai.google.dev/api/generate-content>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_prompt, Summarizer};
use crate::config::Config;
use crate::error::SummarizerError;

/// Client for the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiSummarizer {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl GeminiSummarizer {
    /// Creates a client. `timeout` bounds each HTTP exchange.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SummarizerError::Upstream(e.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            http,
        })
    }

    /// Builds a client from configuration; `None` when no credential is set.
    pub fn from_config(config: &Config) -> Option<Result<Self, SummarizerError>> {
        let api_key = config.api_key.as_ref()?;
        Some(Self::new(
            api_key.clone(),
            config.summarizer_model.clone(),
            config.summarizer_base_url.clone(),
            config.summarizer_timeout(),
        ))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl std::fmt::Debug for GeminiSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSummarizer")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn summarize(&self, excerpt: &[String]) -> Result<String, SummarizerError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(excerpt),
                }],
            }],
        };

        debug!(
            "Requesting summary of {} reviews from model {}",
            excerpt.len(),
            self.model
        );

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        check_status(response.status())?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::Malformed(e.to_string()))?;

        extract_text(body)
    }
}

fn map_transport_error(err: reqwest::Error, timeout: Duration) -> SummarizerError {
    if err.is_timeout() {
        SummarizerError::Timeout(timeout)
    } else {
        SummarizerError::Upstream(err.to_string())
    }
}

fn check_status(status: StatusCode) -> Result<(), SummarizerError> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SummarizerError::Auth),
        StatusCode::TOO_MANY_REQUESTS => Err(SummarizerError::Quota),
        other => Err(SummarizerError::Upstream(format!(
            "generateContent returned {}",
            other
        ))),
    }
}

fn extract_text(body: GenerateResponse) -> Result<String, SummarizerError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| SummarizerError::Malformed("response has no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(SummarizerError::Malformed(
            "candidate contains no text".to_string(),
        ));
    }
    Ok(text)
}

// == Wire Types ==

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
