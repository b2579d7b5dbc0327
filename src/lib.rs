/*!
 * # briefcast
 *
 * A Rust library for turning long-form text documents into short narrated
 * briefs with time-aligned captions.
 *
 * ## Features
 *
 * - Frequency-heuristic extractive summarization (deterministic, two-pass)
 * - Promotional-boilerplate sentence filtering
 * - Silence-based audio segmentation with per-recording adaptive thresholds
 * - Audio-chunk-driven caption synchronization to standard `.srt` output
 * - Pluggable speech-to-text and text-to-speech adapters
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `summarizer`: Extractive summarization engine:
 *   - `summarizer::preprocess`: Cleaning and promotional filtering
 *   - `summarizer::frequency`: Word-frequency profiles
 *   - `summarizer::scoring`: Sentence scoring and top-k selection
 *   - `summarizer::core`: Per-document and collection pipelines
 * - `audio_segmenter`: Silence-based audio chunking
 * - `caption_processor`: Cue accounting and SRT serialization
 * - `text_utils`: Tokenization, sentence splitting, stopwords
 * - `providers`: Speech service adapters:
 *   - `providers::assemblyai`: AssemblyAI speech-to-text client
 *   - `providers::mock`: Deterministic fakes for tests and offline runs
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod audio_segmenter;
pub mod caption_processor;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod summarizer;
pub mod text_utils;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use audio_segmenter::{AudioBuffer, AudioChunk};
pub use caption_processor::{CaptionCue, CaptionTrack, TranscribedChunk};
pub use errors::{AppError, CaptionError, SummaryError, TranscriberError};
pub use summarizer::{Summarizer, WordFrequencyProfile};
