/*!
 * Mock speech-service implementations for tests and offline runs.
 *
 * - `MockTranscriber::scripted(..)` - returns a fixed transcript sequence
 * - `MockTranscriber::silent()` - always hears nothing
 * - `MockTranscriber::failing()` - always fails with an upstream error
 * - `MockSynthesizer` - renders text as tone bursts separated by silence
 */

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::errors::TranscriberError;
use crate::providers::{SpeechSynthesizer, Transcriber};

/// Behavior mode for the mock transcriber
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the scripted transcripts in order, then None
    Scripted(Vec<Option<String>>),
    /// Every chunk comes back without recognizable speech
    Silent,
    /// Every request fails with an upstream error
    Failing,
}

/// Mock transcriber for testing caption workflows
#[derive(Debug)]
pub struct MockTranscriber {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for scripted sequences
    request_count: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Create a mock transcriber with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Transcriber that replays the given transcripts in call order
    pub fn scripted<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let scripted = transcripts
            .into_iter()
            .map(|t| t.map(Into::into))
            .collect();
        Self::new(MockBehavior::Scripted(scripted))
    }

    /// Transcriber that never hears speech
    pub fn silent() -> Self {
        Self::new(MockBehavior::Silent)
    }

    /// Transcriber that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of transcription requests received so far
    pub fn calls(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _wav_bytes: &[u8]) -> Result<Option<String>, TranscriberError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Scripted(transcripts) => {
                Ok(transcripts.get(call).cloned().flatten())
            }
            MockBehavior::Silent => Ok(None),
            MockBehavior::Failing => Err(TranscriberError::RequestFailed(
                "mock transcriber configured to fail".to_string(),
            )),
        }
    }
}

/// Mock synthesizer that renders each sentence as a tone burst followed by a
/// silence gap, so silence-based segmentation finds one chunk per sentence.
#[derive(Debug)]
pub struct MockSynthesizer {
    /// Sample rate of generated audio
    sample_rate: u32,
    /// Tone burst length per sentence, in ms
    burst_ms: u64,
    /// Silence gap between sentences, in ms
    gap_ms: u64,
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            burst_ms: 400,
            gap_ms: 400,
        }
    }
}

impl MockSynthesizer {
    /// Create a mock synthesizer with custom timing - used by tests
    pub fn new(sample_rate: u32, burst_ms: u64, gap_ms: u64) -> Self {
        Self {
            sample_rate,
            burst_ms,
            gap_ms,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TranscriberError> {
        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count()
            .max(1);

        let burst_samples = (self.burst_ms * self.sample_rate as u64 / 1000) as usize;
        let gap_samples = (self.gap_ms * self.sample_rate as u64 / 1000) as usize;

        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)
                .map_err(|e| TranscriberError::RequestFailed(e.to_string()))?;

            for _ in 0..sentence_count {
                for n in 0..burst_samples {
                    let t = n as f32 / self.sample_rate as f32;
                    let value = (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.5;
                    writer
                        .write_sample((value * i16::MAX as f32) as i16)
                        .map_err(|e| TranscriberError::RequestFailed(e.to_string()))?;
                }
                // Trailing gap kept after the last burst too; segmentation
                // absorbs it as boundary padding
                for _ in 0..gap_samples {
                    writer
                        .write_sample(0i16)
                        .map_err(|e| TranscriberError::RequestFailed(e.to_string()))?;
                }
            }

            writer
                .finalize()
                .map_err(|e| TranscriberError::RequestFailed(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }
}
