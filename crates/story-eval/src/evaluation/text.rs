use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static NON_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\- ]").expect("token filter pattern compiles"));

static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence boundary pattern compiles"));

/// Lower-cased tokens longer than `min_chars`, with anything outside
/// `[a-z0-9- ]` treated as a separator.
pub(crate) fn normalized_tokens(text: &str, min_chars: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_TOKEN_RE.replace_all(&lowered, " ");
    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > min_chars)
        .map(str::to_string)
        .collect()
}

/// Share of tokens taken by the `top_terms` most frequent ones.
pub(crate) fn repetition_score(tokens: &[String], top_terms: usize) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *frequency.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<usize> = frequency.into_values().collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let top: usize = counts.into_iter().take(top_terms).sum();

    top as f64 / tokens.len() as f64
}

/// Mean number of whitespace-delimited words per sentence, where sentences
/// end at runs of `.`, `!` or `?`.
pub(crate) fn average_sentence_length(text: &str) -> f64 {
    let lengths: Vec<usize> = SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(word_count)
        .collect();

    if lengths.is_empty() {
        return 0.0;
    }

    lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rounds half away from zero at the given number of decimals.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
