/*!
 * Tests for tokenization, sentence splitting, and stopword filtering
 */

use briefcast::text_utils::{space_token_count, split_sentences, tokenize_words, StopwordFilter};

/// Test sentence splitting on terminators followed by whitespace
#[test]
fn test_split_sentences_withMultipleTerminators_shouldSplitCorrectly() {
    let sentences = split_sentences("First sentence. Second one! Third one? Fourth.");
    assert_eq!(
        sentences,
        vec!["First sentence.", "Second one!", "Third one?", "Fourth."]
    );
}

/// Test that terminators not followed by whitespace do not split
#[test]
fn test_split_sentences_withEmbeddedPeriod_shouldNotSplitMidToken() {
    let sentences = split_sentences("Version 1.5 shipped today. It works.");
    assert_eq!(sentences, vec!["Version 1.5 shipped today.", "It works."]);
}

/// Test splitting of single-letter sentences
#[test]
fn test_split_sentences_withShortSentences_shouldKeepTerminators() {
    let sentences = split_sentences("A. B. C.");
    assert_eq!(sentences, vec!["A.", "B.", "C."]);
}

/// Test that empty and whitespace-only input yields no sentences
#[test]
fn test_split_sentences_withEmptyInput_shouldReturnEmpty() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   \n\t ").is_empty());
}

/// Test word tokenization extracts alphabetic runs and preserves case
#[test]
fn test_tokenize_words_withMixedInput_shouldExtractAlphabeticRuns() {
    let tokens = tokenize_words("Hello, World! 42 times re-entry");
    assert_eq!(tokens, vec!["Hello", "World", "times", "re", "entry"]);
}

/// Test space-separated token counting includes punctuation tokens
#[test]
fn test_space_token_count_withPlainSentence_shouldCountSplits() {
    assert_eq!(space_token_count("one two three"), 3);
    assert_eq!(space_token_count("one"), 1);
}

/// Test the English stopword list
#[test]
fn test_stopword_filter_withEnglishList_shouldMatchCaseInsensitively() {
    let filter = StopwordFilter::english();

    assert!(filter.is_stopword("the"));
    assert!(filter.is_stopword("The"));
    assert!(filter.is_stopword("and"));
    assert!(!filter.is_stopword("reactor"));
    assert!(!filter.is_empty());
}

/// Test that a language code loads its own stopword list, not English
#[test]
fn test_stopword_filter_withLanguageCode_shouldLoadMatchingList() {
    let italian = StopwordFilter::for_language("it").unwrap();
    assert!(italian.is_stopword("di"));
    assert!(italian.is_stopword("che"));
    assert!(!italian.is_stopword("the"));

    let english = StopwordFilter::for_language("en").unwrap();
    assert!(english.is_stopword("the"));
}

/// Test rejection of unknown language codes
#[test]
fn test_stopword_filter_withUnknownCode_shouldFail() {
    assert!(StopwordFilter::for_language("xx").is_err());
    assert!(!StopwordFilter::supports("xx"));
    assert!(StopwordFilter::supports("de"));
}

/// Test custom stopword lists
#[test]
fn test_stopword_filter_withCustomList_shouldOnlyMatchListed() {
    let filter = StopwordFilter::from_list(&["custom", "words"]);

    assert!(filter.is_stopword("custom"));
    assert!(filter.is_stopword("CUSTOM"));
    assert!(!filter.is_stopword("the"));
    assert_eq!(filter.len(), 2);
}
