use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_utils;

// @module: Text preprocessing for summarization

// @const: Bracketed numeric citation markers ([1], [23], [])
static CITATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[0-9]*\]").unwrap());

// @const: Whitespace runs
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// @const: Everything that is not an ASCII letter
static NON_ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z]").unwrap());

/// Sentences containing any of these (case-insensitive) are dropped before
/// summarization; scraped articles routinely carry them as boilerplate.
const PROMOTIONAL_KEYWORDS: [&str; 7] = [
    "sponsored",
    "sponsor",
    "subscription",
    "subscribe",
    "newsletter",
    "advertisement",
    "click here",
];

/// Preprocess an article body for profiling and scoring.
///
/// Returns `(cleaned, alpha_only)`: `cleaned` has citation markers removed and
/// whitespace collapsed to single spaces and is what sentences are scored and
/// extracted from; `alpha_only` additionally replaces every non-alphabetic
/// character with a space and feeds tokenization only, never the final output.
pub fn preprocess(text: &str) -> (String, String) {
    let cleaned = CITATION_REGEX.replace_all(text, " ");
    let cleaned = WHITESPACE_REGEX.replace_all(&cleaned, " ").to_string();
    let alpha_only = NON_ALPHA_REGEX.replace_all(&cleaned, " ").to_string();

    (cleaned, alpha_only)
}

/// Remove whole sentences that look like promotional boilerplate.
///
/// Runs once on the raw input of `Summarizer::summarize_article`, before the
/// document is segmented into thirds. Surviving sentences are re-joined with
/// single spaces.
pub fn filter_promotional(text: &str) -> String {
    let kept: Vec<String> = text_utils::split_sentences(text)
        .into_iter()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            !PROMOTIONAL_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .collect();

    kept.join(" ")
}
