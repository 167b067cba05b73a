//! Provider error types.
//!
//! One shared taxonomy across all three adapters, so the orchestrator and
//! tests can match on failure modes without knowing which backend produced
//! them.

use quizforge_core::ProviderKind;
use thiserror::Error;

/// Error type for provider generation and model-listing operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key configured for the provider.
    #[error("Missing {} API key", .0.display_name())]
    MissingCredential(ProviderKind),

    /// Provider returned a non-2xx response.
    #[error("{} error ({status}): {body}", provider.display_name())]
    Http {
        /// The provider that failed.
        provider: ProviderKind,
        /// HTTP status code.
        status: u16,
        /// Response body (or status text when the body was unreadable).
        body: String,
    },

    /// No text content could be extracted from the response envelope.
    #[error("{} returned an empty response", .0.display_name())]
    EmptyResponse(ProviderKind),

    /// Model output was not parseable as JSON.
    #[error("Invalid JSON in model output: {0}")]
    InvalidJson(String),

    /// Parsed object is missing the required `questions` array.
    #[error("Invalid JSON: missing \"questions\" array")]
    MissingQuestions,

    /// A question entry violated the output contract. The whole batch is
    /// rejected, never a partial one.
    #[error("Malformed question entry: {0}")]
    MalformedEntry(String),

    /// Every attempt in a fallback chain failed; the message concatenates
    /// each attempt's error for diagnosis.
    #[error("{0}")]
    AllAttemptsFailed(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProviderError {
    /// Returns true for errors produced while validating model output, as
    /// opposed to reaching the provider at all.
    pub fn is_output_error(&self) -> bool {
        matches!(
            self,
            ProviderError::InvalidJson(_)
                | ProviderError::MissingQuestions
                | ProviderError::MalformedEntry(_)
                | ProviderError::EmptyResponse(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
