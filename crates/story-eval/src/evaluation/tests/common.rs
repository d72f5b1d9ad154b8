use crate::evaluation::{EvaluationEngine, ScoringRubric, Stage, StoryPayload};

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::new(ScoringRubric::standard())
}

/// `count` distinct qualifying words sharing a prefix, e.g. `kisah000 kisah001 ...`.
pub(super) fn distinct_words(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|index| format!("{prefix}{index:03}")).collect()
}

/// Joins words into sentences of `per_sentence` words each.
pub(super) fn prose(words: &[String], per_sentence: usize) -> String {
    words
        .chunks(per_sentence)
        .map(|chunk| format!("{}.", chunk.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(super) fn fox_payload() -> StoryPayload {
    StoryPayload::new(
        vec![Stage::new(
            "Babak 1",
            &["quick", "slow"],
            "The quick brown fox jumps. The quick brown fox runs.",
        )
        .with_id(1)],
        "hutan",
    )
}

/// Three balanced stages of 300 distinct words, 10 words per sentence.
pub(super) fn polished_payload() -> StoryPayload {
    let stages = ["awal", "tengah", "akhir"]
        .iter()
        .enumerate()
        .map(|(index, prefix)| {
            let words = distinct_words(prefix, 300);
            let keyword = words[0].clone();
            Stage::new(format!("Babak {}", index + 1), &[keyword.as_str()], prose(&words, 10))
        })
        .collect();
    StoryPayload::new(stages, "perjalanan")
}
