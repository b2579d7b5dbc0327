use std::collections::HashMap;

use crate::summarizer::frequency::{WordFrequencyProfile, SENTINEL_KEY, SENTINEL_VALUE};
use crate::text_utils;

// @module: Sentence scoring and top-k selection

/// Sentences longer than this (in space-separated tokens) are never scored;
/// the bias toward short sentences keeps extracts quotable.
pub const MAX_SENTENCE_TOKENS: usize = 30;

/// When fewer than `k + 5` distinct sentences scored, the target shrinks to
/// `round(k / 1.5)` so the summary stays distinguishable from the source.
const SHRINK_MARGIN: usize = 5;

/// Scored sentences in first-seen order.
///
/// Insertion order is the tie-break for top-k selection, so scores are kept in
/// a vector with a side index instead of a bare map whose iteration order
/// would leak into the output.
#[derive(Debug, Clone, Default)]
pub struct SentenceScores {
    // @field: (sentence, accumulated score) in first-seen order
    entries: Vec<(String, f64)>,

    // @field: Sentence -> position in `entries`
    index: HashMap<String, usize>,
}

impl SentenceScores {
    /// Empty score collection
    pub fn new() -> Self {
        Self::default()
    }

    /// The sentinel score map, mirroring the sentinel frequency profile
    pub fn sentinel() -> Self {
        let mut scores = Self::new();
        scores.add(SENTINEL_KEY, SENTINEL_VALUE);
        scores
    }

    /// Accumulate `value` onto `sentence`, inserting it on first sight
    pub fn add(&mut self, sentence: &str, value: f64) {
        match self.index.get(sentence) {
            Some(&pos) => self.entries[pos].1 += value,
            None => {
                self.index.insert(sentence.to_string(), self.entries.len());
                self.entries.push((sentence.to_string(), value));
            }
        }
    }

    /// Number of distinct scored sentences
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no sentence was scored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A single-entry score map is the propagated "no signal" state
    pub fn is_sentinel(&self) -> bool {
        self.entries.len() == 1
    }

    /// Iterate entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.entries.iter()
    }

    /// Score of a specific sentence - used by tests
    #[allow(dead_code)]
    pub fn score_of(&self, sentence: &str) -> Option<f64> {
        self.index.get(sentence).map(|&pos| self.entries[pos].1)
    }
}

/// Score every short sentence of `cleaned` against the frequency profile.
///
/// Each sentence with fewer than [`MAX_SENTENCE_TOKENS`] space-separated
/// tokens accumulates the profile value of every contained word
/// (case-insensitive); words absent from the profile contribute nothing.
/// A degenerate profile propagates as the sentinel score map instead of
/// being scored against a meaningless key.
pub fn score_sentences(cleaned: &str, profile: &WordFrequencyProfile) -> SentenceScores {
    if profile.is_degenerate() {
        return SentenceScores::sentinel();
    }

    let mut scores = SentenceScores::new();
    for sentence in text_utils::split_sentences(cleaned) {
        if text_utils::space_token_count(&sentence) >= MAX_SENTENCE_TOKENS {
            continue;
        }
        for word in text_utils::tokenize_words(&sentence) {
            if let Some(value) = profile.value_of(&word) {
                scores.add(&sentence, value);
            }
        }
    }

    scores
}

/// Select the `k` highest-scoring sentences, joined with single spaces in
/// score-descending order (NOT original document order).
///
/// A sentinel score map yields an empty string: nothing extractable. When
/// fewer than `k + 5` sentences scored, `k` shrinks to `round(k / 1.5)`.
/// Ties keep first-seen order (stable sort over the insertion-ordered list).
pub fn select_top_sentences(scores: &SentenceScores, k: usize) -> String {
    if scores.is_sentinel() {
        return String::new();
    }

    let target = if scores.len() < k + SHRINK_MARGIN {
        (k as f64 / 1.5).round() as usize
    } else {
        k
    };

    let mut ranked: Vec<&(String, f64)> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(target)
        .map(|(sentence, _)| sentence.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
