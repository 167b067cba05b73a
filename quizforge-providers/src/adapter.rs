//! Provider adapter contract and dispatch.
//!
//! Each backend implements one uniform contract; the set of providers is
//! closed and known in advance, so dispatch is a match on
//! [`ProviderKind`] rather than an open plugin registry.

use async_trait::async_trait;
use quizforge_core::{AiSettings, GeneratedBatch, GenerationRequest, ProviderKind};

use crate::claude::ClaudeAdapter;
use crate::error::ProviderError;
use crate::gemini::GeminiAdapter;
use crate::openai::OpenAiAdapter;

// ============================================================================
// Adapter Trait
// ============================================================================

/// A backend capable of generating quiz questions and listing its models.
///
/// Implementations own the provider-specific wire protocol: request
/// construction, endpoint/version fallbacks, response-envelope extraction,
/// and token-usage normalization. All of them feed extracted text through
/// the shared [`crate::parser`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// The provider this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Generates a validated question batch.
    ///
    /// `strict` selects the retry prompt variant and its lower sampling
    /// temperature.
    async fn generate(
        &self,
        settings: &AiSettings,
        request: &GenerationRequest,
        strict: bool,
    ) -> Result<GeneratedBatch, ProviderError>;

    /// Lists the model ids available to the configured credentials.
    async fn list_models(&self, settings: &AiSettings) -> Result<Vec<String>, ProviderError>;
}

// ============================================================================
// Dispatch
// ============================================================================

/// Returns the adapter for a provider kind.
pub fn adapter_for(kind: ProviderKind) -> Box<dyn ProviderAdapter> {
    match kind {
        ProviderKind::OpenAI => Box::new(OpenAiAdapter::new()),
        ProviderKind::Gemini => Box::new(GeminiAdapter::new()),
        ProviderKind::Claude => Box::new(ClaudeAdapter::new()),
    }
}

// ============================================================================
// Tests
// ============================================================================
