//! Provider-related types.
//!
//! This module contains [`ProviderKind`], the closed set of text-generation
//! backends that can be asked to produce quiz questions. Providers are fixed
//! and known in advance, so adapter dispatch is a plain match on this enum
//! rather than an open plugin interface.

use serde::{Deserialize, Serialize};

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported text-generation provider kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI (Chat Completions API)
    #[default]
    OpenAI,
    /// Google Gemini (generateContent API)
    Gemini,
    /// Anthropic Claude (Messages API)
    Claude,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Claude => "Claude",
        }
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
        }
    }

    /// Returns the default model id for this provider.
    ///
    /// Used whenever the user has not picked a model, and re-applied when the
    /// provider selection changes.
    pub fn default_model(&self) -> &'static str {
        match self {
            // Small, cost-effective model
            Self::OpenAI => "gpt-4o-mini",
            // The "-latest" alias maximizes compatibility across API versions
            Self::Gemini => "gemini-1.5-flash-latest",
            Self::Claude => "claude-3-haiku-20240307",
        }
    }

    /// Returns all available provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::OpenAI, Self::Gemini, Self::Claude]
    }

    /// Parses a provider from its CLI name.
    pub fn from_cli_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|p| p.cli_name() == name.to_lowercase())
            .copied()
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Tests
// ============================================================================
