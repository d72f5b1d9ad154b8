//! Optional overlay of an externally generated summary onto a heuristic
//! evaluation.
//!
//! Enrichment is best effort. The heuristic result is always computed first;
//! the summarizer can only add `aiSummary` and change `mode`, and any failure
//! returns the heuristic result untouched.

mod prompt;
mod watsonx;

pub use prompt::build_prompt;
pub use watsonx::{WatsonxClient, WatsonxConfig};

use crate::evaluation::{EvaluationMode, EvaluationResult, StoryPayload};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Source of a free-text summary for a story.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, payload: &StoryPayload) -> Result<String, EnrichmentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("{0} is required when USE_GRANITE=1")]
    MissingSetting(&'static str),

    #[error("HTTP {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("summarizer unavailable: {0}")]
    Unavailable(String),
}

/// Overlay a summary onto a heuristic result without touching its scoring.
pub fn merge_enrichment(base: EvaluationResult, summary: String) -> EvaluationResult {
    EvaluationResult {
        mode: EvaluationMode::Enriched,
        ai_summary: Some(summary),
        ..base
    }
}

/// Ask the summarizer for a summary and merge it, falling back to `base` on
/// any error. The call runs on its own task so a panicking summarizer only
/// costs this request its summary.
pub async fn enrich(
    base: EvaluationResult,
    payload: &StoryPayload,
    summarizer: Option<Arc<dyn Summarizer>>,
) -> EvaluationResult {
    let Some(summarizer) = summarizer else {
        return base;
    };

    let story = payload.clone();
    let attempt = tokio::spawn(async move { summarizer.summarize(&story).await });

    match attempt.await {
        Ok(Ok(summary)) => {
            info!(chars = summary.chars().count(), "story summary attached");
            merge_enrichment(base, summary)
        }
        Ok(Err(err)) => {
            warn!(error = %err, "summary unavailable, returning heuristic evaluation");
            base
        }
        Err(err) => {
            warn!(error = %err, "summary task aborted, returning heuristic evaluation");
            base
        }
    }
}
