use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::TranscriberError;
use crate::providers::Transcriber;

/// AssemblyAI client for speech-to-text transcription
#[derive(Debug)]
pub struct AssemblyAi {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Poll interval while a transcription job is running
    poll_interval: Duration,
}

/// Transcription job request
#[derive(Debug, Serialize)]
struct TranscriptRequest {
    /// URL of the uploaded audio to transcribe
    audio_url: String,
}

/// Response to an audio upload
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// Where the uploaded audio can be referenced from
    upload_url: String,
}

/// Transcription job state
#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    /// Job identifier
    id: String,
    /// Job status: queued, processing, completed, error
    status: String,
    /// Transcript text, present once completed (null for silent audio)
    text: Option<String>,
    /// Error description when status is "error"
    error: Option<String>,
}

impl AssemblyAi {
    /// Create a new AssemblyAI client. The API key comes from configuration;
    /// there is no global settings object to load it from.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            poll_interval: Duration::from_millis(1000),
        }
    }

    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.assemblyai.com/v2".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Upload raw audio bytes, returning the URL the job request references
    async fn upload(&self, wav_bytes: &[u8]) -> Result<String, TranscriberError> {
        let response = self
            .client
            .post(format!("{}/upload", self.base_url()))
            .header("authorization", &self.api_key)
            .body(wav_bytes.to_vec())
            .send()
            .await
            .map_err(|e| TranscriberError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Audio upload failed: {} - {}", status, message);
            return Err(TranscriberError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriberError::ParseError(e.to_string()))?;

        Ok(upload.upload_url)
    }

    /// Submit a transcription job for the uploaded audio
    async fn submit(&self, audio_url: String) -> Result<TranscriptResponse, TranscriberError> {
        let response = self
            .client
            .post(format!("{}/transcript", self.base_url()))
            .header("authorization", &self.api_key)
            .json(&TranscriptRequest { audio_url })
            .send()
            .await
            .map_err(|e| TranscriberError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(TranscriberError::AuthenticationError(
                "AssemblyAI rejected the API key".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranscriberError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TranscriberError::ParseError(e.to_string()))
    }

    /// Poll the job until it completes or errors
    async fn wait_for_completion(
        &self,
        job_id: &str,
    ) -> Result<TranscriptResponse, TranscriberError> {
        loop {
            let response = self
                .client
                .get(format!("{}/transcript/{}", self.base_url(), job_id))
                .header("authorization", &self.api_key)
                .send()
                .await
                .map_err(|e| TranscriberError::ConnectionError(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(TranscriberError::ApiError {
                    status_code: status.as_u16(),
                    message,
                });
            }

            let job: TranscriptResponse = response
                .json()
                .await
                .map_err(|e| TranscriberError::ParseError(e.to_string()))?;

            match job.status.as_str() {
                "completed" => return Ok(job),
                "error" => {
                    let reason = job.error.unwrap_or_else(|| "unknown error".to_string());
                    return Err(TranscriberError::RequestFailed(format!(
                        "Transcription job {} failed: {}",
                        job.id, reason
                    )));
                }
                other => {
                    debug!("Transcription job {} is {}", job.id, other);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

#[async_trait]
impl Transcriber for AssemblyAi {
    async fn transcribe(&self, wav_bytes: &[u8]) -> Result<Option<String>, TranscriberError> {
        let audio_url = self.upload(wav_bytes).await?;
        let job = self.submit(audio_url).await?;
        let finished = self.wait_for_completion(&job.id).await?;

        // A completed job with null/empty text is a silent chunk, not an error
        Ok(finished.text.filter(|t| !t.trim().is_empty()))
    }
}
