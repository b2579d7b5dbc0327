use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::SummaryError;
use crate::text_utils::StopwordFilter;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code for stopword filtering and transcription
    #[serde(default = "default_language")]
    pub language: String,

    /// Summarization config
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Caption generation config
    #[serde(default)]
    pub captions: CaptionConfig,

    /// Transcription service config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Summarization parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SummaryConfig {
    // @field: Target sentence count for the final summary
    #[serde(default = "default_target_sentence_count")]
    pub target_sentence_count: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            target_sentence_count: default_target_sentence_count(),
        }
    }
}

/// Caption synchronization parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaptionConfig {
    // @field: Minimum silence run that triggers a split, in ms
    #[serde(default = "default_min_silence_ms")]
    pub min_silence_ms: u64,

    // @field: Silence padding kept at chunk boundaries, in ms
    #[serde(default = "default_keep_silence_ms")]
    pub keep_silence_ms: u64,

    // @field: Silence threshold offset below clip loudness, in dB
    #[serde(default = "default_threshold_offset_db")]
    pub threshold_offset_db: f64,

    // @field: Whether to re-split chunks into finer sub-segments
    #[serde(default)]
    pub enable_fine_split: bool,

    // @field: Sub-segments per chunk when fine split is enabled
    #[serde(default = "default_break_point")]
    pub break_point: usize,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            min_silence_ms: default_min_silence_ms(),
            keep_silence_ms: default_keep_silence_ms(),
            threshold_offset_db: default_threshold_offset_db(),
            enable_fine_split: false,
            break_point: default_break_point(),
        }
    }
}

/// Transcription provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    // @provider: AssemblyAI REST API (requires api_key)
    AssemblyAi,
    // @provider: Deterministic in-process mock (offline runs, tests)
    #[default]
    Mock,
}

impl TranscriptionProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::AssemblyAi => "AssemblyAI",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::AssemblyAi => "assemblyai".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for TranscriptionProvider
impl std::fmt::Display for TranscriptionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranscriptionProvider
impl std::str::FromStr for TranscriptionProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "assemblyai" => Ok(Self::AssemblyAi),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Transcription service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    // @field: Provider type identifier
    #[serde(default)]
    pub provider: TranscriptionProvider,

    // @field: API key (passed into the adapter constructor, never global)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL, empty for the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            provider: TranscriptionProvider::default(),
            api_key: String::new(),
            endpoint: String::new(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_target_sentence_count() -> usize {
    9
}

fn default_min_silence_ms() -> u64 {
    150
}

fn default_keep_silence_ms() -> u64 {
    150
}

fn default_threshold_offset_db() -> f64 {
    14.0
}

fn default_break_point() -> usize {
    3
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !StopwordFilter::supports(&self.language) {
            return Err(anyhow!(
                "Unsupported language code: '{}' (no bundled stopword list)",
                self.language
            ));
        }

        if self.summary.target_sentence_count == 0 {
            return Err(
                SummaryError::InvalidTargetCount(self.summary.target_sentence_count).into(),
            );
        }

        if self.captions.min_silence_ms == 0 {
            return Err(anyhow!("captions.min_silence_ms must be at least 1"));
        }

        if !self.captions.threshold_offset_db.is_finite() || self.captions.threshold_offset_db <= 0.0 {
            return Err(anyhow!(
                "captions.threshold_offset_db must be a positive finite value"
            ));
        }

        if self.captions.enable_fine_split && self.captions.break_point == 0 {
            return Err(anyhow!(
                "captions.break_point must be at least 1 when fine split is enabled"
            ));
        }

        // Validate API key for providers that need one
        if self.transcription.provider == TranscriptionProvider::AssemblyAi
            && self.transcription.api_key.is_empty()
        {
            return Err(anyhow!(
                "Transcription API key is required for the AssemblyAI provider"
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            summary: SummaryConfig::default(),
            captions: CaptionConfig::default(),
            transcription: TranscriptionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
