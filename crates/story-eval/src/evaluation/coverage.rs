use super::domain::Stage;
use regex::RegexBuilder;
use tracing::debug;

/// Required keywords of a single stage that its text never mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StageGap<'a> {
    pub label: &'a str,
    pub keywords: Vec<&'a str>,
}

impl StageGap<'_> {
    pub fn summary(&self) -> String {
        format!("{}: {}", self.label, self.keywords.join(", "))
    }
}

/// Stages with at least one uncovered keyword, in payload order.
pub(crate) fn coverage_gaps(stages: &[Stage]) -> Vec<StageGap<'_>> {
    stages
        .iter()
        .filter_map(|stage| {
            let keywords: Vec<&str> = stage
                .words
                .iter()
                .map(String::as_str)
                .filter(|keyword| !mentions_keyword(&stage.text, keyword))
                .collect();

            if keywords.is_empty() {
                None
            } else {
                Some(StageGap {
                    label: &stage.label,
                    keywords,
                })
            }
        })
        .collect()
}

/// Case-insensitive whole-word search for a literal keyword.
pub(crate) fn mentions_keyword(text: &str, keyword: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(keyword));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(matcher) => matcher.is_match(text),
        Err(err) => {
            debug!(keyword, error = %err, "keyword pattern rejected, treating as missing");
            false
        }
    }
}
