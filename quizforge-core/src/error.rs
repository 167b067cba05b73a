//! Core error types for quizforge.

use thiserror::Error;

/// Core error type for quizforge operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider not recognized.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
