//! Token accounting and generation results.
//!
//! Providers report token usage in different envelopes; adapters normalize
//! whatever is present into [`TokenUsage`]. The counts are best-effort
//! observability data and may be absent entirely.

use serde::{Deserialize, Serialize};

use super::question::Question;

// ============================================================================
// Token Usage
// ============================================================================

/// Best-effort token accounting from a provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt, when reported.
    pub prompt_tokens: Option<u64>,
    /// Tokens in the model's response, when reported.
    pub completion_tokens: Option<u64>,
}

impl TokenUsage {
    /// Creates usage from optional counts.
    pub fn new(prompt_tokens: Option<u64>, completion_tokens: Option<u64>) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Returns true if neither count is available.
    pub fn is_empty(&self) -> bool {
        self.prompt_tokens.is_none() && self.completion_tokens.is_none()
    }
}

// ============================================================================
// Generated Batch
// ============================================================================

/// A validated batch of generated questions with optional token accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBatch {
    /// The validated questions, in generation order with sequential ids.
    pub questions: Vec<Question>,
    /// Token accounting, when the provider reported it.
    pub usage: Option<TokenUsage>,
}

impl GeneratedBatch {
    /// Creates a batch without usage data.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            usage: None,
        }
    }

    /// Attaches token usage.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Returns true if the batch holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usage_is_empty() {
        assert!(TokenUsage::default().is_empty());
        assert!(!TokenUsage::new(Some(120), None).is_empty());
    }

    #[test]
    fn test_batch_with_usage() {
        let batch = GeneratedBatch::new(vec![]).with_usage(TokenUsage::new(Some(10), Some(20)));
        assert!(batch.is_empty());
        assert_eq!(batch.usage.unwrap().completion_tokens, Some(20));
    }
}
