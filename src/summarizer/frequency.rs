use std::collections::HashMap;

use crate::text_utils::{self, StopwordFilter};

// @module: Word-frequency profile construction

/// Key of the sentinel profile entry signaling "no usable textual signal"
pub const SENTINEL_KEY: &str = "null";

/// Value of the sentinel profile entry
pub const SENTINEL_VALUE: f64 = 0.1;

/// Inputs whose alphabetic-only form is shorter than this yield the sentinel
/// profile without tokenizing.
pub const MIN_PROFILE_CHARS: usize = 50;

/// Max-normalized word occurrence histogram.
///
/// Keys preserve the case they appeared with in the source text; lookups are
/// case-insensitive through a lowercase index built in first-seen token order.
/// Invariant: a non-degenerate profile has at least one value of exactly 1.0.
#[derive(Debug, Clone)]
pub struct WordFrequencyProfile {
    // @field: Case-preserving token -> normalized frequency in (0, 1]
    values: HashMap<String, f64>,

    // @field: Lowercased token -> normalized frequency (first-seen wins)
    lookup: HashMap<String, f64>,
}

impl WordFrequencyProfile {
    /// The degenerate single-entry profile: `{"null": 0.1}`
    pub fn sentinel() -> Self {
        let mut values = HashMap::new();
        values.insert(SENTINEL_KEY.to_string(), SENTINEL_VALUE);
        let lookup = values.clone();
        WordFrequencyProfile { values, lookup }
    }

    /// A profile with at most one entry carries no scoring signal
    pub fn is_degenerate(&self) -> bool {
        self.values.len() <= 1
    }

    /// Case-insensitive frequency lookup
    pub fn value_of(&self, word: &str) -> Option<f64> {
        self.lookup.get(&word.to_lowercase()).copied()
    }

    /// Number of distinct (case-preserving) tokens in the profile
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the profile has no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest normalized frequency, 0.0 for an empty profile
    pub fn max_value(&self) -> f64 {
        self.values.values().fold(0.0_f64, |acc, v| acc.max(*v))
    }

    /// Borrow the underlying case-preserving map
    pub fn as_map(&self) -> &HashMap<String, f64> {
        &self.values
    }
}

/// Build a word-frequency profile from alphabetic-only text.
///
/// Tokens are counted case-preserving after stopword removal, then normalized
/// by the maximum count. Two degenerate cases return the sentinel instead:
/// input shorter than [`MIN_PROFILE_CHARS`] (not even tokenized), and input
/// that tokenizes to nothing but stopwords.
pub fn build_frequency_profile(
    alpha_only: &str,
    stopwords: &StopwordFilter,
) -> WordFrequencyProfile {
    if alpha_only.chars().count() < MIN_PROFILE_CHARS {
        return WordFrequencyProfile::sentinel();
    }

    // First-seen token order kept so the lowercase index is deterministic
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for token in text_utils::tokenize_words(alpha_only) {
        if stopwords.is_stopword(&token) {
            continue;
        }
        let entry = counts.entry(token.clone()).or_insert(0);
        if *entry == 0 {
            order.push(token);
        }
        *entry += 1;
    }

    let max_count = counts.values().copied().max().unwrap_or(0);
    if max_count == 0 {
        return WordFrequencyProfile::sentinel();
    }

    let mut values = HashMap::with_capacity(counts.len());
    let mut lookup = HashMap::with_capacity(counts.len());
    for token in order {
        let normalized = counts[&token] as f64 / max_count as f64;
        lookup.entry(token.to_lowercase()).or_insert(normalized);
        values.insert(token, normalized);
    }

    WordFrequencyProfile { values, lookup }
}
