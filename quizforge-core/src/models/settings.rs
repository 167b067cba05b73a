//! AI provider settings.
//!
//! [`AiSettings`] is the explicitly owned configuration object passed into
//! the orchestrator and adapters by reference. Persistence lives in the
//! store crate; this type is just the data.

use serde::{Deserialize, Serialize};

use super::provider::ProviderKind;
use crate::error::CoreError;

/// User-supplied configuration for AI question generation.
///
/// The API key is sensitive: it is sent only to the selected provider's
/// endpoint, and the `Debug` implementation redacts it so it can never leak
/// through logging.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSettings {
    /// Selected provider.
    #[serde(default)]
    pub provider: ProviderKind,
    /// API key for the selected provider.
    #[serde(default)]
    pub api_key: String,
    /// Model id; falls back to the provider default when empty.
    #[serde(default)]
    pub model: String,
    /// Optional endpoint override (full URL).
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl AiSettings {
    /// Creates settings for a provider with its default model and no key.
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            api_key: String::new(),
            model: provider.default_model().to_string(),
            endpoint: None,
        }
    }

    /// Returns the model id to use, applying the provider default when the
    /// configured value is empty or whitespace.
    pub fn effective_model(&self) -> &str {
        let trimmed = self.model.trim();
        if trimmed.is_empty() {
            self.provider.default_model()
        } else {
            trimmed
        }
    }

    /// Returns the endpoint override, if a non-empty one is configured.
    pub fn endpoint_override(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Validates that the settings are complete enough to reach a provider.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] with a human-readable reason.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::InvalidConfig("API key is required.".to_string()));
        }
        if self.effective_model().is_empty() {
            return Err(CoreError::InvalidConfig("Model is required.".to_string()));
        }
        Ok(())
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self::for_provider(ProviderKind::default())
    }
}

impl std::fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSettings")
            .field("provider", &self.provider)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AiSettings::default();
        assert_eq!(settings.provider, ProviderKind::OpenAI);
        assert_eq!(settings.model, "gpt-4o-mini");
        assert!(settings.api_key.is_empty());
        assert!(settings.endpoint.is_none());
    }

    #[test]
    fn test_effective_model_falls_back_to_provider_default() {
        let mut settings = AiSettings::for_provider(ProviderKind::Gemini);
        settings.model = "  ".to_string();
        assert_eq!(settings.effective_model(), "gemini-1.5-flash-latest");

        settings.model = "gemini-2.0-flash".to_string();
        assert_eq!(settings.effective_model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_validate_requires_api_key() {
        let settings = AiSettings::default();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_validate_passes_with_key() {
        let mut settings = AiSettings::default();
        settings.api_key = "sk-test".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut settings = AiSettings::default();
        settings.api_key = "sk-very-secret".to_string();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_endpoint_override_normalization() {
        let mut settings = AiSettings::default();
        assert_eq!(settings.endpoint_override(), None);

        settings.endpoint = Some("   ".to_string());
        assert_eq!(settings.endpoint_override(), None);

        settings.endpoint = Some("https://proxy.example.com/v1".to_string());
        assert_eq!(settings.endpoint_override(), Some("https://proxy.example.com/v1"));
    }
}
