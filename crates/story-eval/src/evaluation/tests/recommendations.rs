use super::common::*;
use crate::evaluation::{evaluate, Recommendation, Stage, StoryPayload};

fn message(recommendation: Recommendation) -> String {
    recommendation.message().to_string()
}

#[test]
fn closing_recommendations_are_always_last() {
    let payloads = vec![
        StoryPayload::default(),
        fox_payload(),
        polished_payload(),
    ];

    for payload in payloads {
        let recommendations = evaluate(&payload).recommendations;
        let tail = &recommendations[recommendations.len() - 2..];
        assert_eq!(
            tail,
            [
                message(Recommendation::CarouselFormat),
                message(Recommendation::DevelopFullPiece)
            ]
        );
    }
}

#[test]
fn polished_story_only_gets_closing_recommendations() {
    let recommendations = evaluate(&polished_payload()).recommendations;
    assert_eq!(recommendations.len(), 2);
}

#[test]
fn short_repetitive_story_triggers_rules_in_order() {
    let recommendations = evaluate(&fox_payload()).recommendations;
    assert_eq!(
        recommendations,
        vec![
            message(Recommendation::ExpandNarrative),
            message(Recommendation::VaryWordChoice),
            message(Recommendation::CarouselFormat),
            message(Recommendation::DevelopFullPiece),
        ]
    );
}

#[test]
fn empty_story_asks_for_length_and_balance() {
    let recommendations = evaluate(&StoryPayload::default()).recommendations;
    assert_eq!(
        recommendations,
        vec![
            message(Recommendation::ExpandNarrative),
            message(Recommendation::BalanceStages),
            message(Recommendation::CarouselFormat),
            message(Recommendation::DevelopFullPiece),
        ]
    );
}

#[test]
fn run_on_sentences_are_flagged() {
    let words = distinct_words("panjang", 60);
    let payload = StoryPayload::new(vec![Stage::new("Babak 1", &[], words.join(" "))], "");

    let recommendations = evaluate(&payload).recommendations;

    assert!(recommendations.contains(&message(Recommendation::SplitLongSentences)));
    assert!(!recommendations.contains(&message(Recommendation::BalanceStages)));
}
