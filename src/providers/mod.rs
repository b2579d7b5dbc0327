/*!
 * External speech-service boundaries.
 *
 * The summarizer and caption synchronizer never talk to the network
 * themselves; speech-to-text and text-to-speech are consumed through the
 * traits below so adapters stay swappable:
 * - AssemblyAI: REST speech-to-text adapter
 * - Mock: deterministic in-process fakes for tests and offline runs
 *
 * API keys and endpoints are explicit constructor arguments; no adapter
 * reads global mutable settings.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::TranscriberError;

/// Speech-to-text boundary.
///
/// Maps one WAV-encoded audio chunk to its transcript. `Ok(None)` means the
/// service ran fine but heard no recognizable speech; callers must treat
/// that as an empty transcript, not a failure. `Err` is an upstream failure
/// the caller propagates rather than retries.
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    /// Transcribe one WAV-encoded audio chunk
    async fn transcribe(&self, wav_bytes: &[u8]) -> Result<Option<String>, TranscriberError>;
}

/// Text-to-speech boundary.
///
/// Maps text to WAV-encoded narrated audio. Internals are out of scope; the
/// trait only pins the contract the orchestration layer consumes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize narrated audio for the given text
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TranscriberError>;
}

pub mod assemblyai;
pub mod mock;
