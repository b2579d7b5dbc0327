use log::debug;

use crate::summarizer::frequency::{build_frequency_profile, WordFrequencyProfile};
use crate::summarizer::preprocess::{filter_promotional, preprocess};
use crate::summarizer::scoring::{score_sentences, select_top_sentences};
use crate::text_utils::{self, StopwordFilter};

// @module: Document and collection summarization pipeline

/// Number of contiguous segments each document is split into before scoring
const SEGMENT_COUNT: usize = 3;

/// Frequency-heuristic extractive summarizer.
///
/// Holds the stopword filter so repeated calls don't reload the language list.
/// All methods are pure with respect to the input text; re-running on
/// identical input yields identical output.
#[derive(Debug, Clone)]
pub struct Summarizer {
    stopwords: StopwordFilter,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    /// Create a summarizer with the English stopword list
    pub fn new() -> Self {
        Summarizer {
            stopwords: StopwordFilter::english(),
        }
    }

    /// Create a summarizer with a specific stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Summarizer { stopwords }
    }

    /// Summarize one document to roughly `target_sentence_count` sentences.
    ///
    /// The document is cleaned of promotional sentences, split into three
    /// contiguous thirds by sentence count, and each third is summarized
    /// independently to `round(target / 3)` sentences; the three per-segment
    /// summaries are joined with newlines. Sentence order follows segment
    /// order, but within a segment sentences appear by descending score.
    ///
    /// The returned profile is the one built for the LAST segment only; the
    /// first two segments' profiles are discarded. This asymmetry is kept for
    /// compatibility with the reference behavior.
    pub fn summarize_article(
        &self,
        raw_text: &str,
        target_sentence_count: usize,
    ) -> (String, WordFrequencyProfile) {
        let filtered = filter_promotional(raw_text);
        let sentences = text_utils::split_sentences(&filtered);
        let segments = split_into_thirds(&sentences);

        let per_segment_target =
            (target_sentence_count as f64 / SEGMENT_COUNT as f64).round() as usize;

        let mut summaries = Vec::with_capacity(SEGMENT_COUNT);
        let mut last_profile = WordFrequencyProfile::sentinel();

        for segment in &segments {
            let (cleaned, alpha_only) = preprocess(segment);
            let profile = build_frequency_profile(&alpha_only, &self.stopwords);
            let scores = score_sentences(&cleaned, &profile);
            summaries.push(select_top_sentences(&scores, per_segment_target));
            last_profile = profile;
        }

        debug!(
            "Summarized {} sentences into {} segment summaries (target {} per segment)",
            sentences.len(),
            summaries.len(),
            per_segment_target
        );

        (summaries.join("\n"), last_profile)
    }

    /// Two-pass hierarchical summarization over a document collection.
    ///
    /// Every document is summarized independently with the same target count
    /// (the target is NOT divided across documents); the per-document
    /// summaries are joined with newlines and compressed once more through
    /// `summarize_article`. An empty or too-short document contributes an
    /// empty line, which the second pass tolerates.
    pub fn summarize_collection(
        &self,
        documents: &[String],
        target_sentence_count: usize,
    ) -> (String, WordFrequencyProfile) {
        if documents.is_empty() {
            return (String::new(), WordFrequencyProfile::sentinel());
        }

        let per_document: Vec<String> = documents
            .iter()
            .map(|doc| self.summarize_article(doc, target_sentence_count).0)
            .collect();

        self.summarize_article(&per_document.join("\n"), target_sentence_count)
    }
}

/// Split sentences into three contiguous thirds with boundaries at
/// `round(len / 3)` and `round(2 * len / 3)`, each re-joined with spaces.
/// Short inputs leave leading thirds empty; the sentinel path absorbs those.
fn split_into_thirds(sentences: &[String]) -> [String; 3] {
    let len = sentences.len();
    let limit = len as f64 / SEGMENT_COUNT as f64;
    let first = (limit.round() as usize).min(len);
    let second = ((2.0 * limit).round() as usize).min(len);

    [
        sentences[..first].join(" "),
        sentences[first..second].join(" "),
        sentences[second..].join(" "),
    ]
}
