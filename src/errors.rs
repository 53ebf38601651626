/*!
 * Error types for the translation-studio application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised when a picked file cannot become a source document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The filename carries no extension at all
    #[error("Document has no file extension: {0}")]
    MissingExtension(String),

    /// The extension is outside the supported set
    #[error("Unsupported document type '.{extension}' (supported: txt, pdf, docx)")]
    UnsupportedExtension {
        /// Extension as found in the filename
        extension: String,
    },
}

/// Errors produced by the transport before any response is received
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// The transport's own timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The request could not be built (bad URL, bad MIME type)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Submission preconditions that were not met
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No source document is selected
    #[error("Please select a document to translate")]
    NoDocument,

    /// The target language set is empty
    #[error("Please select at least one target language")]
    NoLanguages,
}

/// Reasons a submitted job ends in the failed state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// No response was received from the service
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The service answered with a non-success status
    #[error("Translation service responded with status {0}")]
    ServiceError(u16),

    /// The response body did not have the expected structure
    #[error("Failed to parse translation service response: {0}")]
    ParseError(String),
}

impl From<TransportError> for FailureReason {
    fn from(error: TransportError) -> Self {
        Self::NetworkError(error.to_string())
    }
}

/// Reasons a submit call is refused without sending anything
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Preconditions failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Another submission is still in flight
    #[error("A translation job is already in progress")]
    AlreadySubmitting,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error selecting a document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from the transport layer
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Submission was refused
    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    /// Submission was sent but the job failed
    #[error("Translation failed: {0}")]
    Job(#[from] FailureReason),

    /// The service answered the health check, but not with a healthy status
    #[error("Health check failed: {0}")]
    Health(FailureReason),

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
