//! OpenAI API client.
//!
//! # API Endpoint
//!
//! ```text
//! POST https://api.openai.com/v1/chat/completions
//! Authorization: Bearer <key>
//! ```
//!
//! # Response Format
//!
//! ```json
//! {
//!   "choices": [{"message": {"content": "{\"questions\": [...]}"}}],
//!   "usage": {"prompt_tokens": 320, "completion_tokens": 210}
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

/// Default chat-completions endpoint.
pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Models-listing endpoint.
pub const MODELS_URL: &str = "https://api.openai.com/v1/models";

// ============================================================================
// Request Structures
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// JSON-object output mode hint; models without support ignore it.
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

// ============================================================================
// Response Structures
// ============================================================================

/// Response from the chat-completions API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; only the first is consumed.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    /// Token accounting.
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// Full message (non-streaming responses).
    #[serde(default)]
    pub message: Option<ChatContent>,
    /// Delta payload (some proxies answer in streaming shape).
    #[serde(default)]
    pub delta: Option<ChatContent>,
}

/// Message content wrapper.
#[derive(Debug, Deserialize)]
pub struct ChatContent {
    /// The text payload.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage block.
#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    /// Prompt-side tokens.
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    /// Completion-side tokens.
    #[serde(default)]
    pub completion_tokens: Option<u64>,
}

impl ChatCompletionResponse {
    /// Extracts the text payload, accepting both message and delta shapes.
    pub fn extract_text(&self) -> Option<&str> {
        let choice = self.choices.first()?;
        choice
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .or_else(|| choice.delta.as_ref().and_then(|d| d.content.as_deref()))
            .filter(|text| !text.is_empty())
    }

    /// Normalizes the usage block.
    pub fn token_usage(&self) -> Option<TokenUsage> {
        self.usage
            .as_ref()
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
    }
}

/// Response from the models-listing API.
#[derive(Debug, Deserialize)]
pub struct ModelsResponse {
    /// Available models.
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

/// One model entry.
#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    /// Model id (e.g. "gpt-4o-mini").
    #[serde(default)]
    pub id: Option<String>,
}

// ============================================================================
// Adapter
// ============================================================================

/// OpenAI provider adapter.
#[derive(Debug)]
pub struct OpenAiAdapter {
    http: reqwest::Client,
}

impl OpenAiAdapter {
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
            return Err(ProviderError::MissingCredential(ProviderKind::OpenAI));
        }
        Ok(key)
    }
}

impl Default for OpenAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    #[instrument(skip(self, settings, request))]
    async fn generate(
        &self,
        settings: &AiSettings,
        request: &GenerationRequest,
        strict: bool,
    ) -> Result<GeneratedBatch, ProviderError> {
        let api_key = Self::require_key(settings)?;
        let endpoint = settings.endpoint_override().unwrap_or(CHAT_COMPLETIONS_URL);
        let model = settings.effective_model();

        let user_prompt = if strict {
            prompt::build_strict_prompt(request)
        } else {
            prompt::build_prompt(request)
        };

        let body = ChatRequest {
            model,
            temperature: prompt::temperature(strict),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        debug!(endpoint = %endpoint, model = %model, strict, "Requesting chat completion");

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat completion request failed");
            return Err(ProviderError::Http {
                provider: ProviderKind::OpenAI,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(len = body.len(), "Received chat completion response");

        let completion: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidJson(format!("response envelope: {e}")))?;

        let text = completion
            .extract_text()
            .ok_or(ProviderError::EmptyResponse(ProviderKind::OpenAI))?;

        let questions = parser::parse_questions(text)?;
        let mut batch = GeneratedBatch::new(questions);
        if let Some(usage) = completion.token_usage() {
            batch = batch.with_usage(usage);
        }
        Ok(batch)
    }

    #[instrument(skip(self, settings))]
    async fn list_models(&self, settings: &AiSettings) -> Result<Vec<String>, ProviderError> {
        let api_key = Self::require_key(settings)?;

        debug!("Listing OpenAI models");

        let response = self.http.get(MODELS_URL).bearer_auth(api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                provider: ProviderKind::OpenAI,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let models: ModelsResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidJson(format!("response envelope: {e}")))?;

        let mut ids: Vec<String> = models.data.into_iter().filter_map(|m| m.id).collect();
        ids.sort();
        Ok(ids)
    }
}

// ============================================================================
// Tests
// ============================================================================
