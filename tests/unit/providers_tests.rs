/*!
 * Tests for the mock speech-service providers
 */

use briefcast::audio_segmenter::AudioBuffer;
use briefcast::errors::TranscriberError;
use briefcast::providers::mock::{MockSynthesizer, MockTranscriber};
use briefcast::providers::{SpeechSynthesizer, Transcriber};

/// Test scripted transcripts replay in call order
#[tokio::test]
async fn test_mock_transcriber_withScript_shouldReplayInOrder() {
    let transcriber = MockTranscriber::scripted(vec![
        Some("first"),
        None,
        Some("third"),
    ]);

    assert_eq!(
        transcriber.transcribe(&[]).await.unwrap(),
        Some("first".to_string())
    );
    assert_eq!(transcriber.transcribe(&[]).await.unwrap(), None);
    assert_eq!(
        transcriber.transcribe(&[]).await.unwrap(),
        Some("third".to_string())
    );

    // Past the end of the script the transcriber hears nothing
    assert_eq!(transcriber.transcribe(&[]).await.unwrap(), None);
    assert_eq!(transcriber.calls(), 4);
}

/// Test the silent transcriber
#[tokio::test]
async fn test_mock_transcriber_withSilentBehavior_shouldHearNothing() {
    let transcriber = MockTranscriber::silent();
    assert_eq!(transcriber.transcribe(&[1, 2, 3]).await.unwrap(), None);
}

/// Test the failing transcriber surfaces an upstream error
#[tokio::test]
async fn test_mock_transcriber_withFailingBehavior_shouldReturnError() {
    let transcriber = MockTranscriber::failing();
    let result = transcriber.transcribe(&[]).await;

    assert!(matches!(result, Err(TranscriberError::RequestFailed(_))));
}

/// Test that synthesized audio decodes and scales with sentence count
#[tokio::test]
async fn test_mock_synthesizer_withSentences_shouldEmitDecodableWav() {
    let synthesizer = MockSynthesizer::new(16_000, 200, 200);

    let one = synthesizer.synthesize("Only one sentence.").await.unwrap();
    let three = synthesizer
        .synthesize("First. Second. Third.")
        .await
        .unwrap();

    let one_audio = AudioBuffer::from_wav_bytes(&one).unwrap();
    let three_audio = AudioBuffer::from_wav_bytes(&three).unwrap();

    // One burst+gap pair per sentence
    assert_eq!(one_audio.duration_ms(), 400);
    assert_eq!(three_audio.duration_ms(), 1200);
}
