use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};

use crate::errors::CaptionError;
use crate::text_utils::StopwordFilter;

// @module: Caption cue accounting and SRT serialization

/// Number of sub-segments the optional fine split aims for per chunk
pub const DEFAULT_BREAK_POINT: usize = 3;

/// Transcript and duration of one silence-delimited audio chunk.
///
/// The samples themselves are gone by the time one of these exists; only the
/// text (possibly absent) and the duration survive into caption accounting.
#[derive(Debug, Clone)]
pub struct TranscribedChunk {
    // @field: Transcript text, None when the service heard nothing
    pub text: Option<String>,

    // @field: Chunk duration in ms
    pub duration_ms: u64,
}

impl TranscribedChunk {
    /// Create a transcribed chunk
    pub fn new(text: Option<String>, duration_ms: u64) -> Self {
        TranscribedChunk { text, duration_ms }
    }
}

// @struct: Single caption cue
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionCue {
    // @field: 1-based sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Caption text (may be empty)
    pub text: String,
}

impl CaptionCue {
    /// Creates a new caption cue - used by tests and external consumers
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        CaptionCue {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Parse an SRT timestamp to milliseconds - used by tests
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        // Parse HH:MM:SS,mmm format
        let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm).
    /// Hours are padded to two digits minimum; values of 100 hours and more
    /// simply widen the field, which is accepted for this domain.
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for CaptionCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered, gap-free collection of caption cues
#[derive(Debug, Clone, Default)]
pub struct CaptionTrack {
    /// List of caption cues in chronological order
    pub cues: Vec<CaptionCue>,
}

impl CaptionTrack {
    /// Create an empty caption track
    pub fn new() -> Self {
        CaptionTrack { cues: Vec::new() }
    }

    /// Build cues from transcribed chunks by accumulating durations.
    ///
    /// Cue `i` starts at the running total before chunk `i` and ends after
    /// adding its duration, so consecutive cues are contiguous by
    /// construction: `start[i] == end[i-1]`, starting at zero. A chunk with
    /// an empty or missing transcript still advances the running total; its
    /// cue text is empty but its duration is never dropped. Chunks must be
    /// given in original audio order.
    pub fn from_chunks(chunks: &[TranscribedChunk]) -> Self {
        let mut cues = Vec::with_capacity(chunks.len());
        let mut complete_duration = 0u64;

        for (index, chunk) in chunks.iter().enumerate() {
            let start_time_ms = complete_duration;
            complete_duration += chunk.duration_ms;

            cues.push(CaptionCue::new(
                index + 1,
                start_time_ms,
                complete_duration,
                chunk.text.clone().unwrap_or_default(),
            ));
        }

        debug!(
            "Accumulated {} cue(s) covering {} ms",
            cues.len(),
            complete_duration
        );

        CaptionTrack { cues }
    }

    /// Total covered duration in ms
    pub fn total_duration_ms(&self) -> u64 {
        self.cues.last().map(|cue| cue.end_time_ms).unwrap_or(0)
    }

    /// Serialize the track to SRT cue blocks
    pub fn to_srt_string(&self) -> String {
        let mut output = String::new();
        for cue in &self.cues {
            // Display writes index, timing line, text, blank line
            output.push_str(&cue.to_string());
        }
        output
    }

    /// Write the track to an SRT file.
    ///
    /// The full serialized content is built before anything touches the
    /// filesystem, so a failed write never leaves a partial caption file.
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CaptionError::Write(format!("{}: {}", parent.display(), e)))?;
        }

        let content = self.to_srt_string();
        fs::write(path, content)
            .map_err(|e| CaptionError::Write(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }
}

/// Optional refinement: re-split each chunk into about `break_point`
/// sub-segments over its non-stopword tokens, redistributing the chunk's
/// duration by surviving-token fraction.
///
/// Chunks with a missing transcript are dropped (they carry no tokens to
/// split over), and chunks with too few content tokens pass through
/// unchanged. Not invoked by the default pipeline; gated behind
/// `captions.enable_fine_split`.
pub fn split_chunks(
    chunks: &[TranscribedChunk],
    break_point: usize,
    stopwords: &StopwordFilter,
) -> Vec<TranscribedChunk> {
    let mut refined = Vec::new();

    for chunk in chunks {
        let Some(text) = chunk.text.as_deref() else {
            warn!("Dropping untranscribed chunk ({} ms) during fine split", chunk.duration_ms);
            continue;
        };

        let words: Vec<&str> = text.split_whitespace().collect();
        let filtered_indices: Vec<usize> = words
            .iter()
            .enumerate()
            .filter(|(_, word)| {
                let core: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
                !core.is_empty() && !stopwords.is_stopword(&core)
            })
            .map(|(i, _)| i)
            .collect();

        let total_filtered = filtered_indices.len();
        if break_point == 0 || total_filtered < break_point + 2 {
            refined.push(chunk.clone());
            continue;
        }

        // First `remainder` segments carry one extra content token
        let words_per_segment = total_filtered / break_point;
        let remainder = total_filtered % break_point;

        let mut cursor = 0usize;
        let mut assigned_ms = 0u64;
        let mut segments: Vec<(String, usize)> = Vec::with_capacity(break_point);

        for seg in 0..break_point {
            let take = words_per_segment + usize::from(seg < remainder);
            let indices = &filtered_indices[cursor..cursor + take];
            cursor += take;

            let first = indices[0];
            let last = *indices.last().unwrap();
            segments.push((words[first..=last].join(" "), indices.len()));
        }

        let last_index = segments.len() - 1;
        for (i, (text, count)) in segments.into_iter().enumerate() {
            // The final segment absorbs rounding leftovers so the chunk's
            // total duration is preserved exactly
            let duration_ms = if i == last_index {
                chunk.duration_ms - assigned_ms
            } else {
                let share =
                    (chunk.duration_ms as f64 * count as f64 / total_filtered as f64) as u64;
                assigned_ms += share;
                share
            };
            refined.push(TranscribedChunk::new(Some(text), duration_ms));
        }
    }

    refined
}
