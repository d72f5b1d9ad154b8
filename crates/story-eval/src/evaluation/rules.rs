use super::rubric::ScoringRubric;
use serde::{Deserialize, Serialize};

/// Raw, unrounded measurements the score and recommendations are derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StorySignals {
    pub total_words: usize,
    pub balance: f64,
    pub repetition: f64,
    pub avg_sentence: f64,
    pub fully_covered: bool,
}

/// Criterion contributing points to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Coverage,
    Balance,
    Repetition,
    SentenceLength,
    Length,
}

/// Discrete contribution to a score, kept for audit logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

pub(crate) fn score_signals(
    signals: &StorySignals,
    rubric: &ScoringRubric,
) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::with_capacity(5);

    let (covered, uncovered) = rubric.coverage_points;
    components.push(if signals.fully_covered {
        ScoreComponent {
            factor: ScoreFactor::Coverage,
            points: covered,
            notes: "every required keyword appears".to_string(),
        }
    } else {
        ScoreComponent {
            factor: ScoreFactor::Coverage,
            points: uncovered,
            notes: "some required keywords are missing".to_string(),
        }
    });

    components.push(ScoreComponent {
        factor: ScoreFactor::Balance,
        points: (rubric.balance_points * signals.balance.min(1.0)).max(0.0),
        notes: format!("shortest/longest stage ratio {:.2}", signals.balance),
    });

    let (varied, repetitive) = rubric.repetition_points;
    components.push(if signals.repetition < rubric.repetition_limit {
        ScoreComponent {
            factor: ScoreFactor::Repetition,
            points: varied,
            notes: format!(
                "repetition {:.3} below {:.2}",
                signals.repetition, rubric.repetition_limit
            ),
        }
    } else {
        ScoreComponent {
            factor: ScoreFactor::Repetition,
            points: repetitive,
            notes: format!(
                "repetition {:.3} at or above {:.2}",
                signals.repetition, rubric.repetition_limit
            ),
        }
    });

    let (concise, wordy) = rubric.sentence_points;
    components.push(if signals.avg_sentence < rubric.long_sentence_words {
        ScoreComponent {
            factor: ScoreFactor::SentenceLength,
            points: concise,
            notes: format!("{:.1} words per sentence", signals.avg_sentence),
        }
    } else {
        ScoreComponent {
            factor: ScoreFactor::SentenceLength,
            points: wordy,
            notes: format!(
                "{:.1} words per sentence reaches {:.0}",
                signals.avg_sentence, rubric.long_sentence_words
            ),
        }
    });

    if signals.total_words > rubric.long_story_words {
        components.push(ScoreComponent {
            factor: ScoreFactor::Length,
            points: rubric.length_bonus_points,
            notes: format!(
                "{} words exceeds {}",
                signals.total_words, rubric.long_story_words
            ),
        });
    }

    let total = components
        .iter()
        .fold(0.0, |sum, component| sum + component.points);
    (components, total)
}

/// Writing advice emitted after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    ExpandNarrative,
    BalanceStages,
    VaryWordChoice,
    SplitLongSentences,
    CarouselFormat,
    DevelopFullPiece,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::ExpandNarrative => {
                "Perpanjang narasi hingga ±700–1200 kata untuk versi blog/Medium."
            }
            Recommendation::BalanceStages => {
                "Samakan panjang antar babak agar ritme cerita konsisten."
            }
            Recommendation::VaryWordChoice => {
                "Kurangi repetisi kata yang sama, gunakan sinonim dan variasi kalimat."
            }
            Recommendation::SplitLongSentences => {
                "Pecah kalimat panjang menjadi 2–3 kalimat lebih pendek."
            }
            Recommendation::CarouselFormat => {
                "Susun versi carousel (1 slide per babak) untuk Instagram/LinkedIn."
            }
            Recommendation::DevelopFullPiece => {
                "Jika idenya kuat, kembangkan jadi esai/cerpen untuk dikirim ke lomba."
            }
        }
    }
}

pub(crate) fn recommendations(
    signals: &StorySignals,
    rubric: &ScoringRubric,
) -> Vec<Recommendation> {
    let mut advice = Vec::new();

    if signals.total_words < rubric.short_story_words {
        advice.push(Recommendation::ExpandNarrative);
    }
    if signals.balance < rubric.balance_floor {
        advice.push(Recommendation::BalanceStages);
    }
    if signals.repetition > rubric.repetition_limit {
        advice.push(Recommendation::VaryWordChoice);
    }
    if signals.avg_sentence > rubric.long_sentence_words {
        advice.push(Recommendation::SplitLongSentences);
    }

    advice.push(Recommendation::CarouselFormat);
    advice.push(Recommendation::DevelopFullPiece);
    advice
}
