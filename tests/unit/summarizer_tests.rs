/*!
 * Tests for the extractive summarization engine
 */

use briefcast::summarizer::{
    build_frequency_profile, filter_promotional, preprocess, score_sentences,
    select_top_sentences, SentenceScores, Summarizer, WordFrequencyProfile,
};
use briefcast::text_utils::StopwordFilter;

use crate::common;

/// Test citation stripping and whitespace collapsing
#[test]
fn test_preprocess_withCitationsAndWhitespace_shouldCleanBothVariants() {
    let (cleaned, alpha_only) = preprocess("The  reactor[1] runs\twell [23] today.");

    assert!(!cleaned.contains("[1]"));
    assert!(!cleaned.contains("[23]"));
    assert!(!cleaned.contains("  "));
    assert!(cleaned.contains("reactor"));

    // The alpha-only variant replaces every non-letter with a space
    assert!(alpha_only.chars().all(|c| c.is_ascii_alphabetic() || c == ' '));
    assert!(alpha_only.contains("reactor"));
}

/// Test promotional sentence removal
#[test]
fn test_filter_promotional_withBoilerplate_shouldDropWholeSentences() {
    let text = "The findings were published. Subscribe to our newsletter today! \
                The board meets tomorrow. This article is sponsored by Acme.";
    let filtered = filter_promotional(text);

    assert!(filtered.contains("The findings were published."));
    assert!(filtered.contains("The board meets tomorrow."));
    assert!(!filtered.to_lowercase().contains("subscribe"));
    assert!(!filtered.to_lowercase().contains("sponsored"));
}

/// Test the short-input sentinel guard
#[test]
fn test_build_frequency_profile_withShortInput_shouldReturnSentinel() {
    let stopwords = StopwordFilter::english();
    let profile = build_frequency_profile("too short to profile", &stopwords);

    assert!(profile.is_degenerate());
    assert_eq!(profile.len(), 1);
    assert_eq!(profile.value_of("null"), Some(0.1));
}

/// Test the stopword-only sentinel guard
#[test]
fn test_build_frequency_profile_withOnlyStopwords_shouldReturnSentinel() {
    let stopwords = StopwordFilter::english();
    let text = "the and of to in the and of to in the and of to in the and of";
    assert!(text.len() >= 50);

    let profile = build_frequency_profile(text, &stopwords);
    assert!(profile.is_degenerate());
}

/// Test normalization: the most frequent word gets exactly 1.0
#[test]
fn test_build_frequency_profile_withRepeatedWords_shouldNormalizeByMax() {
    let stopwords = StopwordFilter::english();
    let text = "apple banana apple cherry apple banana orange melon grape";
    assert!(text.len() >= 50);

    let profile = build_frequency_profile(text, &stopwords);
    assert!(!profile.is_degenerate());
    assert_eq!(profile.value_of("apple"), Some(1.0));
    assert_eq!(profile.max_value(), 1.0);

    // banana appears twice out of a max of three
    let banana = profile.value_of("banana").unwrap();
    assert!((banana - 2.0 / 3.0).abs() < 1e-9);
}

/// Test case-insensitive profile lookup
#[test]
fn test_profile_lookup_withDifferentCase_shouldResolve() {
    let stopwords = StopwordFilter::english();
    let text = "Reactor coolant reactor telemetry reactor coolant safety data here";
    let profile = build_frequency_profile(text, &stopwords);

    assert!(profile.value_of("REACTOR").is_some());
    assert_eq!(profile.value_of("REACTOR"), profile.value_of("reactor"));
}

/// Test sentinel propagation through sentence scoring
#[test]
fn test_score_sentences_withSentinelProfile_shouldPropagateSentinel() {
    let scores = score_sentences("Any text at all.", &WordFrequencyProfile::sentinel());

    assert!(scores.is_sentinel());
    assert_eq!(scores.score_of("null"), Some(0.1));
}

/// Test that long sentences are excluded from scoring
#[test]
fn test_score_sentences_withLongSentence_shouldSkipIt() {
    let stopwords = StopwordFilter::english();
    let text = "apple banana apple cherry apple banana orange melon grape";
    let profile = build_frequency_profile(text, &stopwords);

    let long_sentence = format!("apple {}.", "pad ".repeat(35).trim_end());
    let cleaned = format!("Short apple sentence. {}", long_sentence);
    let scores = score_sentences(&cleaned, &profile);

    assert!(scores.score_of("Short apple sentence.").is_some());
    assert!(scores.score_of(&long_sentence).is_none());
}

/// Test sentence score accumulation over contained words
#[test]
fn test_score_sentences_withProfileWords_shouldAccumulateValues() {
    let stopwords = StopwordFilter::english();
    let text = "apple banana apple cherry apple banana orange melon grape";
    let profile = build_frequency_profile(text, &stopwords);

    let scores = score_sentences("Apple banana together.", &profile);
    let expected = 1.0 + 2.0 / 3.0;
    let actual = scores.score_of("Apple banana together.").unwrap();
    assert!((actual - expected).abs() < 1e-9);
}

/// Test that the sentinel score map yields an empty selection
#[test]
fn test_select_top_sentences_withSentinelScores_shouldReturnEmpty() {
    let scores = SentenceScores::sentinel();
    assert_eq!(select_top_sentences(&scores, 5), "");
}

/// Test top-k selection order and bound
#[test]
fn test_select_top_sentences_withManySentences_shouldPickHighestInScoreOrder() {
    let mut scores = SentenceScores::new();
    for (i, text) in ["S1.", "S2.", "S3.", "S4.", "S5.", "S6.", "S7.", "S8."]
        .iter()
        .enumerate()
    {
        scores.add(text, (i + 1) as f64);
    }

    // 8 >= 3 + 5, so no shrink applies
    let summary = select_top_sentences(&scores, 3);
    assert_eq!(summary, "S8. S7. S6.");
}

/// Test the near-exhaustive shrink rule
#[test]
fn test_select_top_sentences_withFewSentences_shouldShrinkTarget() {
    let mut scores = SentenceScores::new();
    for (i, text) in ["S1.", "S2.", "S3.", "S4.", "S5.", "S6."].iter().enumerate() {
        scores.add(text, (i + 1) as f64);
    }

    // 6 < 3 + 5 shrinks the target to round(3 / 1.5) == 2
    let summary = select_top_sentences(&scores, 3);
    assert_eq!(summary, "S6. S5.");
}

/// Test deterministic tie-breaking by first-seen order
#[test]
fn test_select_top_sentences_withTiedScores_shouldKeepFirstSeenOrder() {
    let mut scores = SentenceScores::new();
    for text in ["T1.", "T2.", "T3.", "T4.", "T5.", "T6.", "T7.", "T8."] {
        scores.add(text, 1.0);
    }

    let summary = select_top_sentences(&scores, 2);
    assert_eq!(summary, "T1. T2.");
}

/// Test the degenerate end-to-end example: tiny documents must not panic
#[test]
fn test_summarize_collection_withTinyDocuments_shouldNotPanic() {
    let summarizer = Summarizer::new();
    let documents = vec!["A. B. C. D. E. F.".to_string(), "G. H. I.".to_string()];

    let (summary, profile) = summarizer.summarize_collection(&documents, 3);

    // Every segment is below the profiling minimum, so nothing is extractable
    assert!(summary.trim().is_empty());
    assert!(profile.is_degenerate());
}

/// Test summarization of a realistic article
#[test]
fn test_summarize_article_withLongArticle_shouldExtractVerbatimSentences() {
    let summarizer = Summarizer::new();
    let article = common::long_article();

    let (summary, profile) = summarizer.summarize_article(&article, 6);

    assert!(!summary.trim().is_empty());
    // Per-segment summaries are joined with newlines across the three thirds
    assert_eq!(summary.lines().count(), 3);

    // A third with enough alphabetic signal produces a real profile
    assert!(!profile.is_degenerate());
    assert_eq!(profile.max_value(), 1.0);

    // Every extracted sentence is a verbatim sentence of the source
    let source_sentences = briefcast::text_utils::split_sentences(&article);
    for line in summary.lines() {
        for sentence in briefcast::text_utils::split_sentences(line) {
            assert!(
                source_sentences.contains(&sentence),
                "extracted sentence not found verbatim: {}",
                sentence
            );
        }
    }
}

/// Test idempotence: identical input yields identical output
#[test]
fn test_summarize_article_withSameInput_shouldBeIdempotent() {
    let summarizer = Summarizer::new();
    let article = common::long_article();

    let (first, _) = summarizer.summarize_article(&article, 6);
    let (second, _) = summarizer.summarize_article(&article, 6);
    assert_eq!(first, second);
}

/// Test the empty-collection failure mode
#[test]
fn test_summarize_collection_withNoDocuments_shouldReturnEmptyAndSentinel() {
    let summarizer = Summarizer::new();
    let (summary, profile) = summarizer.summarize_collection(&[], 5);

    assert_eq!(summary, "");
    assert!(profile.is_degenerate());
}
