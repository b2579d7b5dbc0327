use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

// @module: Shared text utilities (tokenization, sentence splitting, stopwords)

// @const: Word token regex (alphabetic runs only)
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+").unwrap());

/// Split text into sentences.
///
/// A sentence ends at a `.`, `!` or `?` that is followed by whitespace (or the
/// end of input). The terminator stays attached to its sentence, matching the
/// usual SRT/quote-friendly convention where "A. B." yields `["A.", "B."]`.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            // Only break if the terminator is followed by whitespace or EOF
            match chars.peek() {
                Some(next) if next.is_whitespace() => {
                    let sentence = current.trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence.to_string());
                    }
                    current.clear();
                    // Consume the whitespace run separating sentences
                    while chars.peek().is_some_and(|n| n.is_whitespace()) {
                        chars.next();
                    }
                }
                None => {}
                Some(_) => {}
            }
        }
    }

    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }

    sentences
}

/// Tokenize text into alphabetic word tokens, preserving case.
pub fn tokenize_words(text: &str) -> Vec<String> {
    WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Count space-separated tokens the way the scoring rules do: a plain split
/// on single spaces, punctuation included.
pub fn space_token_count(sentence: &str) -> usize {
    sentence.split(' ').count()
}

// @struct: Language stopword filter
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    // @field: Stopword set (lowercase)
    words: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

/// Map an ISO 639-1 language code to a bundled stopword list
fn language_for_code(code: &str) -> Option<LANGUAGE> {
    match code.to_lowercase().as_str() {
        "en" => Some(LANGUAGE::English),
        "de" => Some(LANGUAGE::German),
        "fr" => Some(LANGUAGE::French),
        "es" => Some(LANGUAGE::Spanish),
        "it" => Some(LANGUAGE::Italian),
        "pt" => Some(LANGUAGE::Portuguese),
        "nl" => Some(LANGUAGE::Dutch),
        "sv" => Some(LANGUAGE::Swedish),
        "da" => Some(LANGUAGE::Danish),
        "fi" => Some(LANGUAGE::Finnish),
        "ru" => Some(LANGUAGE::Russian),
        "tr" => Some(LANGUAGE::Turkish),
        "el" => Some(LANGUAGE::Greek),
        "hu" => Some(LANGUAGE::Hungarian),
        "ro" => Some(LANGUAGE::Romanian),
        "uk" => Some(LANGUAGE::Ukrainian),
        "ar" => Some(LANGUAGE::Arabic),
        "ca" => Some(LANGUAGE::Catalan),
        "id" => Some(LANGUAGE::Indonesian),
        _ => None,
    }
}

impl StopwordFilter {
    /// Create a filter loaded with the English stopword list
    pub fn english() -> Self {
        Self::from_language(LANGUAGE::English)
    }

    /// Create a filter for an ISO 639-1 language code (e.g. "en", "it")
    pub fn for_language(code: &str) -> Result<Self> {
        let language = language_for_code(code)
            .ok_or_else(|| anyhow!("Unsupported language code: {}", code))?;
        Ok(Self::from_language(language))
    }

    /// Whether a language code maps to a bundled stopword list
    pub fn supports(code: &str) -> bool {
        language_for_code(code).is_some()
    }

    fn from_language(language: LANGUAGE) -> Self {
        let words = get(language)
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        StopwordFilter { words }
    }

    /// Create a filter from a custom list - used by tests
    #[allow(dead_code)]
    pub fn from_list(words: &[&str]) -> Self {
        StopwordFilter {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    // @checks: Case-insensitive stopword membership
    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the filter is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
