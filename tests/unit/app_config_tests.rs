/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use briefcast::app_config::{Config, LogLevel, TranscriptionProvider};
use briefcast::errors::SummaryError;

/// Test that the default configuration passes validation
#[test]
fn test_default_config_withNoChanges_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.language, "en");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(!config.captions.enable_fine_split);
}

/// Test deserialization with omitted sections falling back to defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldApplyDefaults() {
    let json = r#"{ "summary": { "target_sentence_count": 5 } }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.summary.target_sentence_count, 5);
    assert_eq!(config.captions.min_silence_ms, 150);
    assert_eq!(config.captions.keep_silence_ms, 150);
    assert!((config.captions.threshold_offset_db - 14.0).abs() < f64::EPSILON);
    assert_eq!(config.transcription.provider, TranscriptionProvider::Mock);
}

/// Test config serialization round trip
#[test]
fn test_config_serialization_withDefaults_shouldRoundTrip() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.summary.target_sentence_count, config.summary.target_sentence_count);
    assert_eq!(parsed.captions.break_point, config.captions.break_point);
    assert_eq!(parsed.transcription.provider, config.transcription.provider);
}

/// Test validation failures
#[test]
fn test_config_validation_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.summary.target_sentence_count = 0;
    let err = config.validate().unwrap_err();
    assert!(err.downcast_ref::<SummaryError>().is_some());

    let mut config = Config::default();
    config.captions.min_silence_ms = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.captions.threshold_offset_db = -3.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.captions.enable_fine_split = true;
    config.captions.break_point = 0;
    assert!(config.validate().is_err());
}

/// Test that an unsupported language code fails validation
#[test]
fn test_config_validation_withUnknownLanguage_shouldFail() {
    let mut config = Config::default();
    config.language = "xx".to_string();
    assert!(config.validate().is_err());

    config.language = "it".to_string();
    assert!(config.validate().is_ok());
}

/// Test that the AssemblyAI provider requires an API key
#[test]
fn test_config_validation_withAssemblyAiAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.transcription.provider = TranscriptionProvider::AssemblyAi;
    assert!(config.validate().is_err());

    config.transcription.api_key = "key-from-config".to_string();
    assert!(config.validate().is_ok());
}

/// Test provider parsing and display
#[test]
fn test_transcription_provider_withStringForms_shouldConvertBothWays() {
    assert_eq!(
        TranscriptionProvider::from_str("assemblyai").unwrap(),
        TranscriptionProvider::AssemblyAi
    );
    assert_eq!(
        TranscriptionProvider::from_str("MOCK").unwrap(),
        TranscriptionProvider::Mock
    );
    assert!(TranscriptionProvider::from_str("whisper").is_err());

    assert_eq!(TranscriptionProvider::AssemblyAi.to_string(), "assemblyai");
    assert_eq!(TranscriptionProvider::AssemblyAi.display_name(), "AssemblyAI");
}
