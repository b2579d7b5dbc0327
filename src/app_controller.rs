use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::app_config::{Config, TranscriptionProvider};
use crate::audio_segmenter::{AudioBuffer, AudioChunk};
use crate::caption_processor::{split_chunks, CaptionTrack, TranscribedChunk};
use crate::errors::CaptionError;
use crate::file_utils::FileManager;
use crate::providers::assemblyai::AssemblyAi;
use crate::providers::mock::MockTranscriber;
use crate::providers::{SpeechSynthesizer, Transcriber};
use crate::summarizer::Summarizer;
use crate::text_utils::StopwordFilter;

// @module: Application controller wiring summarization and caption generation

/// File name of the caption track written next to the narrated audio
const CAPTION_FILE_NAME: &str = "captions.srt";

/// File name of the written summary
const SUMMARY_FILE_NAME: &str = "summary.txt";

/// File name of the narrated audio in the full pipeline
const SPEECH_FILE_NAME: &str = "speech.wav";

/// Main application controller.
///
/// Owns the summarizer, the stopword filter shared with the optional fine
/// split, and the transcription adapter built from configuration. The two
/// cores stay pure; everything touching the filesystem or the network lives
/// here.
pub struct Controller {
    /// Application configuration
    config: Config,

    /// Extractive summarization engine
    summarizer: Summarizer,

    /// Stopword filter for the caption fine split
    stopwords: StopwordFilter,

    /// Speech-to-text adapter
    transcriber: Arc<dyn Transcriber>,
}

impl Controller {
    /// Create a controller from configuration, building the transcription
    /// adapter the config names and loading the configured language's
    /// stopword list. API keys travel through the constructor; there is no
    /// global settings object.
    pub fn with_config(config: Config) -> Result<Self> {
        let transcriber: Arc<dyn Transcriber> = match config.transcription.provider {
            TranscriptionProvider::AssemblyAi => Arc::new(AssemblyAi::new(
                config.transcription.api_key.clone(),
                config.transcription.endpoint.clone(),
            )),
            TranscriptionProvider::Mock => {
                warn!("Using the mock transcriber; caption text will be empty");
                Arc::new(MockTranscriber::silent())
            }
        };

        Self::with_transcriber(config, transcriber)
    }

    /// Create a controller with an explicit transcriber - used by tests
    pub fn with_transcriber(config: Config, transcriber: Arc<dyn Transcriber>) -> Result<Self> {
        let stopwords = StopwordFilter::for_language(&config.language)?;

        Ok(Controller {
            config,
            summarizer: Summarizer::with_stopwords(stopwords.clone()),
            stopwords,
            transcriber,
        })
    }

    /// Summarize every `.txt` document under `input_dir` into one brief.
    ///
    /// Documents are read in stable path order, compressed with the two-pass
    /// collection summarizer, and the result is written to `summary.txt` in
    /// `output_dir`. Returns the summary text.
    pub fn run_summarize<P: AsRef<Path>>(&self, input_dir: P, output_dir: P) -> Result<String> {
        let input_dir = input_dir.as_ref();
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_files(input_dir, "txt")?;
        if files.is_empty() {
            warn!("No .txt documents found in {:?}", input_dir);
        }

        let documents = files
            .iter()
            .map(FileManager::read_to_string)
            .collect::<Result<Vec<_>>>()?;

        info!("Summarizing {} document(s)", documents.len());
        let (summary, profile) = self
            .summarizer
            .summarize_collection(&documents, self.config.summary.target_sentence_count);

        if profile.is_degenerate() {
            warn!("Documents carried no usable textual signal, summary may be empty");
        }

        let output_path = FileManager::generate_output_path(output_dir, SUMMARY_FILE_NAME);
        FileManager::write_to_file(&output_path, &summary)?;
        info!("Summary written to {:?}", output_path);

        Ok(summary)
    }

    /// Generate a caption track for a narrated WAV recording.
    ///
    /// Segments the audio on silence, transcribes every chunk in original
    /// order, accumulates timestamps, and writes `captions.srt` to
    /// `output_dir`. The cue list is built completely before anything is
    /// written, so a failed transcription never produces a partial file.
    /// Returns the path of the written caption file.
    pub async fn generate_captions<P: AsRef<Path>>(
        &self,
        audio_path: P,
        output_dir: P,
    ) -> Result<PathBuf> {
        let audio = AudioBuffer::from_wav_file(audio_path.as_ref())
            .with_context(|| format!("Failed to load audio: {:?}", audio_path.as_ref()))?;

        self.generate_captions_from_buffer(&audio, output_dir.as_ref())
            .await
    }

    /// Caption generation over an already-loaded audio buffer
    pub async fn generate_captions_from_buffer(
        &self,
        audio: &AudioBuffer,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let captions = &self.config.captions;
        let chunks = audio.split_on_silence(
            captions.min_silence_ms,
            captions.keep_silence_ms,
            captions.threshold_offset_db,
        );

        if chunks.is_empty() {
            return Err(CaptionError::NoChunks(format!(
                "{} ms of audio produced no speech chunks",
                audio.duration_ms()
            ))
            .into());
        }

        let mut transcribed = self.transcribe_chunks(&chunks).await?;

        if captions.enable_fine_split {
            debug!(
                "Fine-splitting {} chunk(s) with break point {}",
                transcribed.len(),
                captions.break_point
            );
            transcribed = split_chunks(&transcribed, captions.break_point, &self.stopwords);
        }

        let track = CaptionTrack::from_chunks(&transcribed);
        let output_path = FileManager::generate_output_path(output_dir, CAPTION_FILE_NAME);
        track.write_to_srt(&output_path)?;
        info!(
            "Caption track with {} cue(s) written to {:?}",
            track.cues.len(),
            output_path
        );

        Ok(output_path)
    }

    /// Transcribe chunks strictly in original audio order.
    ///
    /// Timestamp accumulation depends on this order; reordering chunks would
    /// move every later cue. An empty transcript is tolerated (the chunk's
    /// duration still counts); a transcriber error aborts the whole run.
    async fn transcribe_chunks(&self, chunks: &[AudioChunk]) -> Result<Vec<TranscribedChunk>> {
        let progress = ProgressBar::new(chunks.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks transcribed",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut transcribed = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let wav_bytes = chunk.to_wav_bytes()?;
            let text = self
                .transcriber
                .transcribe(&wav_bytes)
                .await
                .with_context(|| format!("Transcription failed on chunk {}", index + 1))?;

            if text.is_none() {
                debug!("Chunk {} has no recognizable speech", index + 1);
            }

            transcribed.push(TranscribedChunk::new(text, chunk.duration_ms()));
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(transcribed)
    }

    /// Full pipeline: summarize documents, narrate the summary through the
    /// given synthesizer, and caption the narration.
    ///
    /// Writes `summary.txt`, `speech.wav` and `captions.srt` into
    /// `output_dir`; returns the caption file path. An empty summary aborts
    /// before synthesis so no empty narration is produced.
    pub async fn run_pipeline<P: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: P,
        synthesizer: &dyn SpeechSynthesizer,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        FileManager::ensure_dir(output_dir)?;

        let summary = self.run_summarize(input_dir.as_ref(), output_dir)?;
        if summary.trim().is_empty() {
            return Err(anyhow!(
                "No summary produced from input documents, aborting narration"
            ));
        }

        let wav_bytes = synthesizer
            .synthesize(&summary)
            .await
            .context("Speech synthesis failed")?;

        let speech_path = FileManager::generate_output_path(output_dir, SPEECH_FILE_NAME);
        std::fs::write(&speech_path, &wav_bytes)
            .with_context(|| format!("Failed to write narrated audio: {:?}", speech_path))?;
        info!("Narrated audio written to {:?}", speech_path);

        let audio = AudioBuffer::from_wav_bytes(&wav_bytes)?;
        self.generate_captions_from_buffer(&audio, output_dir).await
    }
}
