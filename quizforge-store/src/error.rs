//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Settings are incomplete; the message is the user-visible reason and
    /// is displayed verbatim.
    #[error("{0}")]
    InvalidSettings(String),

    /// Generation failed after every attempt.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
