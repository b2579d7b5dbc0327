/*!
 * Frequency-heuristic extractive summarization.
 *
 * The engine turns one or more raw documents into a bounded-length summary by:
 * - `preprocess`: cleaning citation markers and deriving an alphabetic-only variant
 * - `frequency`: building a max-normalized word-frequency profile
 * - `scoring`: scoring sentences against the profile and selecting the top k
 * - `core`: segmenting each document into thirds and running the two-pass
 *   per-document / cross-document pipeline
 *
 * All stages are pure and deterministic; ties in top-k selection are broken by
 * first-seen sentence order.
 */

pub mod preprocess;
pub mod frequency;
pub mod scoring;
pub mod core;

// Re-export main types for easier usage
pub use self::core::Summarizer;
pub use self::frequency::{build_frequency_profile, WordFrequencyProfile};
pub use self::preprocess::{filter_promotional, preprocess};
pub use self::scoring::{score_sentences, select_top_sentences, SentenceScores};
