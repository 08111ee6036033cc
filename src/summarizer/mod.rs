//! Summarizer Module
//!
//! The external capability that turns an excerpt of review texts into a
//! short summary. [`Summarizer`] is the seam the query service depends on;
//! [`GeminiSummarizer`] is the production implementation.

mod gemini;

use async_trait::async_trait;

use crate::error::SummarizerError;

pub use gemini::GeminiSummarizer;

// == Summarizer Trait ==
/// Generates a summary for an ordered excerpt of review texts.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Summarizes `excerpt`, newest review first.
    async fn summarize(&self, excerpt: &[String]) -> Result<String, SummarizerError>;
}

/// Builds the instruction sent alongside the excerpt.
pub fn build_prompt(excerpt: &[String]) -> String {
    let mut prompt = String::new();
    for text in excerpt {
        prompt.push_str("- ");
        prompt.push_str(text);
        prompt.push('\n');
    }
    prompt.push_str("\nWrite a short summary of the product reviews above.");
    prompt
}
