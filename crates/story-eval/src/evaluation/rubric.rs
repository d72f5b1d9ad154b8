use serde::{Deserialize, Serialize};

/// Thresholds and point values applied by the evaluation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRubric {
    /// Tokens must be longer than this to count toward repetition.
    pub min_token_chars: usize,
    pub top_terms: usize,
    pub repetition_limit: f64,
    pub long_sentence_words: f64,
    pub balance_floor: f64,
    pub short_story_words: usize,
    pub long_story_words: usize,
    pub coverage_points: (f64, f64),
    pub balance_points: f64,
    pub repetition_points: (f64, f64),
    pub sentence_points: (f64, f64),
    pub length_bonus_points: f64,
}

impl ScoringRubric {
    pub fn standard() -> Self {
        Self {
            min_token_chars: 3,
            top_terms: 10,
            repetition_limit: 0.12,
            long_sentence_words: 24.0,
            balance_floor: 0.5,
            short_story_words: 500,
            long_story_words: 800,
            coverage_points: (30.0, 10.0),
            balance_points: 20.0,
            repetition_points: (20.0, 5.0),
            sentence_points: (20.0, 10.0),
            length_bonus_points: 10.0,
        }
    }
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self::standard()
    }
}
