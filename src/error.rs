//! Error types for the Docgate client.

use thiserror::Error;

/// Main error type for Docgate operations.
#[derive(Error, Debug)]
pub enum DocgateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document or signature failed validation before submission
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The wait for an admission slot was cancelled before a slot freed up
    #[error("Admission wait cancelled before a slot became available")]
    Cancelled,

    /// Payload serialization errors
    #[error("Failed to serialize submission payload: {0}")]
    Serialization(#[source] serde_json::Error),

    /// HTTP transport errors
    #[error("Transport error during document submission: {0}")]
    Transport(#[source] reqwest::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Docgate operations.
pub type Result<T> = std::result::Result<T, DocgateError>;
