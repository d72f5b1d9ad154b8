//! Heuristic evaluation of multi-stage story drafts.
//!
//! The engine is a pure function of the payload: it measures keyword
//! coverage, stage balance, vocabulary repetition and sentence length, then
//! folds those signals into a composite score and a list of writing advice.

mod coverage;
mod domain;
mod rubric;
mod rules;
mod text;

#[cfg(test)]
mod tests;

pub use domain::{PayloadError, Stage, StoryPayload};
pub use rubric::ScoringRubric;
pub use rules::{Recommendation, ScoreComponent, ScoreFactor};

use rules::StorySignals;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Origin of an evaluation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationMode {
    #[serde(rename = "heuristic")]
    Heuristic,
    #[serde(rename = "granite+heuristic")]
    Enriched,
}

/// Rounded measurements reported alongside the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryMetrics {
    pub total_words: usize,
    pub balance: f64,
    pub repetition: f64,
    pub avg_sentence: f64,
}

/// Evaluation output returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub mode: EvaluationMode,
    pub score: i64,
    pub metrics: StoryMetrics,
    pub missing: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

/// Stateless evaluator applying a scoring rubric to story payloads.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    rubric: ScoringRubric,
}

impl EvaluationEngine {
    pub fn new(rubric: ScoringRubric) -> Self {
        Self { rubric }
    }

    pub fn evaluate(&self, payload: &StoryPayload) -> EvaluationResult {
        let (signals, missing) = self.measure(payload);
        let (components, total) = rules::score_signals(&signals, &self.rubric);
        debug!(
            stages = payload.stages.len(),
            total_words = signals.total_words,
            ?components,
            total,
            "story evaluated"
        );

        let recommendations = rules::recommendations(&signals, &self.rubric)
            .into_iter()
            .map(|advice| advice.message().to_string())
            .collect();

        EvaluationResult {
            mode: EvaluationMode::Heuristic,
            score: total.round() as i64,
            metrics: StoryMetrics {
                total_words: signals.total_words,
                balance: text::round_to(signals.balance, 2),
                repetition: text::round_to(signals.repetition, 3),
                avg_sentence: text::round_to(signals.avg_sentence, 1),
            },
            missing,
            recommendations,
            ai_summary: None,
        }
    }

    /// Per-factor breakdown of the score for a payload.
    pub fn score_components(&self, payload: &StoryPayload) -> Vec<ScoreComponent> {
        let (signals, _) = self.measure(payload);
        rules::score_signals(&signals, &self.rubric).0
    }

    fn measure(&self, payload: &StoryPayload) -> (StorySignals, Vec<String>) {
        let full_text = payload
            .stages
            .iter()
            .map(|stage| stage.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let total_words = text::word_count(&full_text);
        let balance = stage_balance(&payload.stages);

        let missing: Vec<String> = coverage::coverage_gaps(&payload.stages)
            .iter()
            .map(|gap| gap.summary())
            .collect();

        let tokens = text::normalized_tokens(&full_text, self.rubric.min_token_chars);
        let repetition = text::repetition_score(&tokens, self.rubric.top_terms);
        let avg_sentence = text::average_sentence_length(&full_text);

        let signals = StorySignals {
            total_words,
            balance,
            repetition,
            avg_sentence,
            fully_covered: missing.is_empty(),
        };
        (signals, missing)
    }
}

/// Evaluate a payload with the standard rubric.
pub fn evaluate(payload: &StoryPayload) -> EvaluationResult {
    EvaluationEngine::default().evaluate(payload)
}

/// Shortest stage word count over the longest (floored at one word).
/// A story without stages has no balance and reports zero.
fn stage_balance(stages: &[Stage]) -> f64 {
    let lengths: Vec<usize> = stages
        .iter()
        .map(|stage| text::word_count(&stage.text))
        .collect();

    match (lengths.iter().min(), lengths.iter().max()) {
        (Some(&shortest), Some(&longest)) => shortest as f64 / longest.max(1) as f64,
        _ => 0.0,
    }
}
