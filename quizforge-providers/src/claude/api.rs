//! Claude API client.
//!
//! # API Endpoint
//!
//! ```text
//! POST https://api.anthropic.com/v1/messages
//! x-api-key: <key>
//! anthropic-version: 2023-06-01
//! ```
//!
//! # Response Format
//!
//! ```json
//! {
//!   "content": [{"type": "text", "text": "{\"questions\": [...]}"}],
//!   "usage": {"input_tokens": 290, "output_tokens": 205}
//! }
//! ```

use async_trait::async_trait;
use quizforge_core::{
    AiSettings, GeneratedBatch, GenerationRequest, ProviderKind, TokenUsage,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::parser;
use crate::prompt;

// ============================================================================
// Constants
// ============================================================================

/// Default Messages API endpoint.
pub const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// Models-listing endpoint.
pub const MODELS_URL: &str = "https://api.anthropic.com/v1/models";

/// API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upper bound for generated output.
const MAX_TOKENS: u32 = 1000;

/// System instruction for the Messages API.
const SYSTEM_INSTRUCTION: &str = "You are an expert quiz question generator. \
    Always return strictly valid JSON with no code fences or extra commentary.";

/// Known Claude 3 models, used when the listing endpoint fails.
const STATIC_MODELS: &[&str] = &[
    "claude-3-haiku-20240307",
    "claude-3-sonnet-20240229",
    "claude-3-opus-20240229",
    "claude-3-5-sonnet-20240620",
];

// ============================================================================
// Request Structures
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'static str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

// ============================================================================
// Response Structures
// ============================================================================

/// Response from the Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    /// Content blocks; the first text block is the payload.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Token accounting.
    #[serde(default)]
    pub usage: Option<MessagesUsage>,
}

/// One content block.
#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    /// Text payload of the block.
    #[serde(default)]
    pub text: Option<String>,
}

/// Token usage block.
#[derive(Debug, Deserialize)]
pub struct MessagesUsage {
    /// Prompt-side tokens.
    #[serde(default)]
    pub input_tokens: Option<u64>,
    /// Completion-side tokens.
    #[serde(default)]
    pub output_tokens: Option<u64>,
}

impl MessagesResponse {
    /// Extracts the text of the first content block.
    pub fn extract_text(&self) -> Option<&str> {
        self.content
            .first()
            .and_then(|block| block.text.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// Normalizes the usage block.
    pub fn token_usage(&self) -> Option<TokenUsage> {
        self.usage
            .as_ref()
            .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens))
    }
}

/// Response from the models-listing API.
#[derive(Debug, Deserialize)]
pub struct ClaudeModelsResponse {
    /// Available models.
    #[serde(default)]
    pub data: Vec<ClaudeModelEntry>,
}

/// One model entry.
#[derive(Debug, Deserialize)]
pub struct ClaudeModelEntry {
    /// Model id.
    #[serde(default)]
    pub id: Option<String>,
}

// ============================================================================
// Adapter
// ============================================================================

/// Claude provider adapter.
#[derive(Debug)]
pub struct ClaudeAdapter {
    http: reqwest::Client,
}

impl ClaudeAdapter {
    /// Creates a new adapter with the shared client configuration.
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { http }
    }

    fn require_key(settings: &AiSettings) -> Result<&str, ProviderError> {
        let key = settings.api_key.trim();
        if key.is_empty() {
            return Err(ProviderError::MissingCredential(ProviderKind::Claude));
        }
        Ok(key)
    }

    /// Returns the static model list, sorted.
    fn static_models() -> Vec<String> {
        let mut models: Vec<String> = STATIC_MODELS.iter().map(ToString::to_string).collect();
        models.sort();
        models
    }
}

impl Default for ClaudeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for ClaudeAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    #[instrument(skip(self, settings, request))]
    async fn generate(
        &self,
        settings: &AiSettings,
        request: &GenerationRequest,
        strict: bool,
    ) -> Result<GeneratedBatch, ProviderError> {
        let api_key = Self::require_key(settings)?;
        let endpoint = settings.endpoint_override().unwrap_or(MESSAGES_URL);
        let model = settings.effective_model();

        let user_prompt = if strict {
            prompt::build_strict_prompt(request)
        } else {
            prompt::build_prompt(request)
        };

        let body = MessagesRequest {
            model,
            max_tokens: MAX_TOKENS,
            temperature: prompt::temperature(strict),
            system: SYSTEM_INSTRUCTION,
            messages: vec![Message {
                role: "user",
                content: &user_prompt,
            }],
        };

        debug!(endpoint = %endpoint, model = %model, strict, "Requesting message completion");

        let response = self
            .http
            .post(endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Message request failed");
            return Err(ProviderError::Http {
                provider: ProviderKind::Claude,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(len = body.len(), "Received message response");

        let message: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidJson(format!("response envelope: {e}")))?;

        let text = message
            .extract_text()
            .ok_or(ProviderError::EmptyResponse(ProviderKind::Claude))?;

        let questions = parser::parse_questions(text)?;
        let mut batch = GeneratedBatch::new(questions);
        if let Some(usage) = message.token_usage() {
            batch = batch.with_usage(usage);
        }
        Ok(batch)
    }

    #[instrument(skip(self, settings))]
    async fn list_models(&self, settings: &AiSettings) -> Result<Vec<String>, ProviderError> {
        let api_key = Self::require_key(settings)?;

        debug!("Listing Claude models");

        let result = async {
            let response = self
                .http
                .get(MODELS_URL)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::Http {
                    provider: ProviderKind::Claude,
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response.text().await?;
            let models: ClaudeModelsResponse = serde_json::from_str(&body)
                .map_err(|e| ProviderError::InvalidJson(format!("response envelope: {e}")))?;

            let mut ids: Vec<String> = models.data.into_iter().filter_map(|m| m.id).collect();
            ids.sort();
            Ok(ids)
        }
        .await;

        // The listing endpoint is newer than some deployments; fall back to
        // the static list instead of failing the settings flow.
        match result {
            Ok(ids) if !ids.is_empty() => Ok(ids),
            Ok(_) => Ok(Self::static_models()),
            Err(e) => {
                warn!(error = %e, "Model listing failed, using static list");
                Ok(Self::static_models())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
