use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, warn};

use crate::errors::CaptionError;

// @module: Silence-based audio segmentation

/// Silence threshold offset below the clip's own average loudness, in dB.
/// The threshold adapts per-recording; override via `CaptionConfig`.
pub const DEFAULT_THRESHOLD_OFFSET_DB: f64 = 14.0;

/// Default minimum silence run length that triggers a split, in ms
pub const DEFAULT_MIN_SILENCE_MS: u64 = 150;

/// Default padding of silence kept at each chunk boundary, in ms
pub const DEFAULT_KEEP_SILENCE_MS: u64 = 150;

/// In-memory mono audio clip.
///
/// Samples are normalized to [-1.0, 1.0]; multi-channel sources are mixed
/// down to mono on load. The buffer is consumed once by segmentation and
/// never persisted.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    // @field: Mono samples in [-1.0, 1.0]
    samples: Vec<f32>,

    // @field: Samples per second
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap raw mono samples - used by tests and synthesizer adapters
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        AudioBuffer { samples, sample_rate }
    }

    /// Load a WAV file, mixing all channels down to mono
    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> Result<Self, CaptionError> {
        let reader = WavReader::open(path.as_ref())
            .map_err(|e| CaptionError::AudioDecode(format!("{:?}: {}", path.as_ref(), e)))?;
        Self::from_wav_reader(reader)
    }

    /// Decode WAV bytes (e.g. a synthesizer response) into a buffer
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self, CaptionError> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| CaptionError::AudioDecode(e.to_string()))?;
        Self::from_wav_reader(reader)
    }

    fn from_wav_reader<R: std::io::Read>(mut reader: WavReader<R>) -> Result<Self, CaptionError> {
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CaptionError::AudioDecode(e.to_string()))?,
            SampleFormat::Int => {
                let scale = ((1_i64 << (spec.bits_per_sample - 1)) as f32).max(1.0);
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| CaptionError::AudioDecode(e.to_string()))?
            }
        };

        // Mix interleaved frames down to mono
        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        Ok(AudioBuffer {
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    /// Clip length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Number of mono samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the clip holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Overall loudness in dBFS (0 dBFS = full-scale RMS); silent clips
    /// report negative infinity.
    pub fn dbfs(&self) -> f64 {
        let rms = self.rms();
        if rms <= 0.0 {
            f64::NEG_INFINITY
        } else {
            20.0 * rms.log10()
        }
    }

    fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|s| (*s as f64) * (*s as f64)).sum();
        (sum_sq / self.samples.len() as f64).sqrt()
    }

    fn ms_to_sample(&self, ms: u64) -> usize {
        ((ms * self.sample_rate as u64) / 1000) as usize
    }

    /// Split the clip wherever a silence run of at least `min_silence_ms` is
    /// detected, keeping `keep_silence_ms` of padding at each chunk boundary.
    ///
    /// The silence threshold is `threshold_offset_db` below the clip's own
    /// RMS loudness, so the detection adapts per-recording. Padding is
    /// clamped at the midpoint of the separating silence so consecutive
    /// chunks never overlap and total duration is never double-counted.
    /// A clip with no detectable silence comes back as a single chunk; a
    /// fully silent clip yields no chunks.
    pub fn split_on_silence(
        &self,
        min_silence_ms: u64,
        keep_silence_ms: u64,
        threshold_offset_db: f64,
    ) -> Vec<AudioChunk> {
        let total_ms = self.duration_ms();
        if self.samples.is_empty() || total_ms == 0 {
            return Vec::new();
        }

        // Linear amplitude threshold; equivalent to clip dBFS minus the offset
        let threshold = self.rms() * 10f64.powf(-threshold_offset_db / 20.0);

        let silent_ranges = self.detect_silence_ranges(min_silence_ms, threshold, total_ms);
        let speech_ranges = complement_ranges(&silent_ranges, total_ms);
        if speech_ranges.is_empty() {
            warn!("Audio is entirely below the silence threshold, no chunks produced");
            return Vec::new();
        }

        let padded = pad_ranges(&speech_ranges, keep_silence_ms, total_ms);
        debug!(
            "Split {} ms of audio into {} chunk(s) ({} silent range(s), threshold {:.1} dBFS offset)",
            total_ms,
            padded.len(),
            silent_ranges.len(),
            threshold_offset_db
        );

        padded
            .iter()
            .map(|&(start_ms, end_ms)| {
                let a = self.ms_to_sample(start_ms).min(self.samples.len());
                let b = self.ms_to_sample(end_ms).min(self.samples.len());
                AudioChunk {
                    samples: self.samples[a..b].to_vec(),
                    sample_rate: self.sample_rate,
                }
            })
            .collect()
    }

    /// Detect maximal silent ranges `[start_ms, end_ms)` where every sliding
    /// window of `min_silence_ms` stays at or below the linear threshold.
    fn detect_silence_ranges(
        &self,
        min_silence_ms: u64,
        threshold: f64,
        total_ms: u64,
    ) -> Vec<(u64, u64)> {
        if min_silence_ms == 0 || total_ms < min_silence_ms {
            return Vec::new();
        }

        // Prefix sums of squared samples give O(1) window RMS
        let mut prefix = Vec::with_capacity(self.samples.len() + 1);
        prefix.push(0.0_f64);
        for s in &self.samples {
            let v = *s as f64;
            prefix.push(prefix.last().unwrap() + v * v);
        }

        let threshold_sq = threshold * threshold;
        let mut ranges: Vec<(u64, u64)> = Vec::new();

        for start_ms in 0..=(total_ms - min_silence_ms) {
            let a = self.ms_to_sample(start_ms);
            let b = self.ms_to_sample(start_ms + min_silence_ms).min(self.samples.len());
            if b <= a {
                continue;
            }
            let mean_sq = (prefix[b] - prefix[a]) / (b - a) as f64;
            if mean_sq > threshold_sq {
                continue;
            }

            let window = (start_ms, start_ms + min_silence_ms);
            match ranges.last_mut() {
                // Overlapping or adjacent silent windows merge into one range
                Some(last) if window.0 <= last.1 => last.1 = window.1,
                _ => ranges.push(window),
            }
        }

        ranges
    }
}

/// A contiguous silence-delimited span of the source audio.
///
/// Consumed immediately after transcription; the samples are dropped once the
/// chunk's text and duration have been extracted.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    // @field: Mono samples in [-1.0, 1.0]
    samples: Vec<f32>,

    // @field: Samples per second
    sample_rate: u32,
}

impl AudioChunk {
    /// Chunk length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Number of mono samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the chunk holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Encode the chunk as 16-bit mono WAV bytes for upload to a transcriber
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)
                .context("Failed to create WAV writer for audio chunk")?;
            for s in &self.samples {
                let clamped = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(clamped)
                    .context("Failed to write audio chunk sample")?;
            }
            writer.finalize().context("Failed to finalize audio chunk WAV")?;
        }

        Ok(cursor.into_inner())
    }
}

/// Invert silent ranges into speech ranges over `[0, total_ms)`
fn complement_ranges(silent: &[(u64, u64)], total_ms: u64) -> Vec<(u64, u64)> {
    let mut speech = Vec::new();
    let mut cursor = 0u64;

    for &(start, end) in silent {
        if start > cursor {
            speech.push((cursor, start));
        }
        cursor = cursor.max(end);
    }
    if cursor < total_ms {
        speech.push((cursor, total_ms));
    }

    speech
}

/// Pad each range by `keep_ms` on both sides, clamping to the clip bounds and
/// splitting the difference where neighbors would otherwise overlap.
fn pad_ranges(ranges: &[(u64, u64)], keep_ms: u64, total_ms: u64) -> Vec<(u64, u64)> {
    let mut padded: Vec<(u64, u64)> = ranges
        .iter()
        .map(|&(start, end)| (start.saturating_sub(keep_ms), (end + keep_ms).min(total_ms)))
        .collect();

    for i in 1..padded.len() {
        if padded[i].0 < padded[i - 1].1 {
            let midpoint = (padded[i - 1].1 + padded[i].0) / 2;
            padded[i - 1].1 = midpoint;
            padded[i].0 = midpoint;
        }
    }

    padded
}
