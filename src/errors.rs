/*!
 * Error types for the briefcast application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to external speech services
#[derive(Error, Debug)]
pub enum TranscriberError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The service finished but returned nothing usable for the whole recording
    #[error("Upstream service returned no result: {0}")]
    EmptyResult(String),
}

/// Errors that can occur during summarization
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The target sentence count is not usable
    #[error("Invalid target sentence count: {0}")]
    InvalidTargetCount(usize),
}

/// Errors that can occur while segmenting audio or writing caption tracks
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Error decoding the source audio
    #[error("Failed to decode audio: {0}")]
    AudioDecode(String),

    /// The recording contains no detectable speech chunks
    #[error("No speech chunks found in audio: {0}")]
    NoChunks(String),

    /// Error from the transcription service
    #[error("Transcriber error: {0}")]
    Transcriber(#[from] TranscriberError),

    /// Error writing the caption file
    #[error("Failed to write caption file: {0}")]
    Write(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a speech service
    #[error("Transcriber error: {0}")]
    Transcriber(#[from] TranscriberError),

    /// Error from summarization
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Error from caption generation
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
