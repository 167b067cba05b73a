//! Gemini API client.
//!
//! # API Endpoint
//!
//! ```text
//! POST https://generativelanguage.googleapis.com/v1/models/<model>:generateContent?key=<key>
//! ```
//!
//! # Response Format
//!
//! ```json
//! {
//!   "candidates": [{"content": {"parts": [{"text": "{\"questions\": [...]}"}]}}],
//!   "usageMetadata": {"promptTokenCount": 310, "candidatesTokenCount": 190}
//! }
//! ```
//!
//! Several alternate content shapes are seen in the wild; extraction walks
//! the documented fallbacks before giving up.

use async_trait::async_trait;
use quizforge_core::{
    AiSettings, GeneratedBatch, GenerationRequest, ProviderKind, TokenUsage,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::parser;
use crate::prompt;

// ============================================================================
// Constants
// ============================================================================

/// Generative Language API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

// ============================================================================
// Request Structures
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    /// Omitted entirely on no-MIME attempts; some deployments reject it.
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt_text: &'a str, strict: bool, with_mime: bool) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt_text }],
            }],
            generation_config: GenerationConfig {
                temperature: prompt::temperature(strict),
                response_mime_type: with_mime.then_some("application/json"),
            },
        }
    }
}

// ============================================================================
// Response Extraction
// ============================================================================

/// Extracts the text payload from a generateContent response, trying the
/// primary shape and the known alternates in order.
pub(crate) fn extract_text(data: &Value) -> Option<String> {
    let candidate = data.get("candidates").and_then(|c| c.get(0));

    let from_candidate = candidate.and_then(|candidate| {
        let content = candidate.get("content")?;
        // Primary shape: content.parts[0].text
        content
            .get("parts")
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(Value::as_str)
            // Alternate: content[0].text
            .or_else(|| content.get(0).and_then(|c| c.get("text")).and_then(Value::as_str))
            // Alternate: content[0].string_value
            .or_else(|| {
                content
                    .get(0)
                    .and_then(|c| c.get("string_value"))
                    .and_then(Value::as_str)
            })
            // Alternate: content.text
            .or_else(|| content.get("text").and_then(Value::as_str))
            .map(String::from)
    });

    from_candidate
        // Some SDK-shaped responses carry a top-level "text"
        .or_else(|| data.get("text").and_then(Value::as_str).map(String::from))
        .filter(|text| !text.is_empty())
}

/// Normalizes the usage metadata block, when present.
fn token_usage(data: &Value) -> Option<TokenUsage> {
    let metadata = data.get("usageMetadata")?;
    let usage = TokenUsage::new(
        metadata.get("promptTokenCount").and_then(Value::as_u64),
        metadata.get("candidatesTokenCount").and_then(Value::as_u64),
    );
    (!usage.is_empty()).then_some(usage)
}

/// Normalizes a model id for the v1beta fallback by stripping the
/// `-latest` alias suffix.
pub(crate) fn fallback_model_id(model: &str) -> &str {
    model.strip_suffix("-latest").unwrap_or(model)
}

/// Model entry from the models-listing API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiModelEntry {
    /// Model resource name (e.g. "models/gemini-1.5-flash").
    #[serde(default)]
    pub name: Option<String>,

    /// Generation methods the model supports.
    #[serde(default)]
    pub supported_generation_methods: Option<Vec<String>>,
}

/// Response from the models-listing API.
#[derive(Debug, Deserialize)]
pub struct GeminiModelsResponse {
    /// Available models.
    #[serde(default)]
    pub models: Vec<GeminiModelEntry>,
}

// ============================================================================
// Adapter
// ============================================================================

/// Gemini provider adapter.
#[derive(Debug)]
pub struct GeminiAdapter {
    http: reqwest::Client,
}

impl GeminiAdapter {
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
            return Err(ProviderError::MissingCredential(ProviderKind::Gemini));
        }
        Ok(key)
    }

    fn generate_url(version: &str, model: &str) -> String {
        format!("{GEMINI_API_BASE}/{version}/models/{model}:generateContent")
    }

    /// Posts one generateContent attempt.
    ///
    /// The inner `Err` carries a non-2xx status and body, so the caller can
    /// decide whether to walk the fallback chain. Transport failures abort
    /// the chain immediately via the outer error.
    async fn post_generate(
        &self,
        url: &str,
        api_key: &str,
        prompt_text: &str,
        strict: bool,
        with_mime: bool,
    ) -> Result<Result<Value, (u16, String)>, ProviderError> {
        let body = GenerateContentRequest::new(prompt_text, strict, with_mime);

        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(Err((status.as_u16(), body)));
        }

        let body = response.text().await?;
        debug!(len = body.len(), "Received generateContent response");

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidJson(format!("response envelope: {e}")))?;
        Ok(Ok(data))
    }

    /// Runs the attempt chain: original endpoint, no-MIME retry on 400,
    /// v1beta fallback on 404. Records each attempt's error so exhaustion
    /// reports the full history.
    async fn generate_with_fallbacks(
        &self,
        settings: &AiSettings,
        prompt_text: &str,
        strict: bool,
    ) -> Result<Value, ProviderError> {
        let api_key = Self::require_key(settings)?;
        let model = settings.effective_model();

        let primary_url = settings
            .endpoint_override()
            .map_or_else(|| Self::generate_url("v1", model), String::from);

        debug!(url = %primary_url, model = %model, strict, "Requesting content generation");

        let (status, body) = match self
            .post_generate(&primary_url, api_key, prompt_text, strict, true)
            .await?
        {
            Ok(data) => return Ok(data),
            Err(failure) => failure,
        };
        warn!(status, "Content generation failed, evaluating fallbacks");
        let mut errors = vec![format!("Gemini error ({status}): {body}")];

        // Some deployments reject the MIME hint outright; retry bare.
        let retry_status = if status == 400 {
            match self
                .post_generate(&primary_url, api_key, prompt_text, strict, false)
                .await?
            {
                Ok(data) => return Ok(data),
                Err((retry_status, retry_body)) => {
                    errors.push(format!("Retry error ({retry_status}): {retry_body}"));
                    Some(retry_status)
                }
            }
        } else {
            None
        };

        // A 404 from the original call or the retry means the model/route
        // pair only exists on v1beta.
        if status == 404 || retry_status == Some(404) {
            let fallback_url = Self::generate_url("v1beta", fallback_model_id(model));
            match self
                .post_generate(&fallback_url, api_key, prompt_text, strict, false)
                .await?
            {
                Ok(data) => return Ok(data),
                Err((fb_status, fb_body)) => {
                    errors.push(format!("Fallback error ({fb_status}): {fb_body}"));
                }
            }
        }

        if errors.len() == 1 {
            return Err(ProviderError::Http {
                provider: ProviderKind::Gemini,
                status,
                body,
            });
        }
        Err(ProviderError::AllAttemptsFailed(errors.join(" | ")))
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    #[instrument(skip(self, settings, request))]
    async fn generate(
        &self,
        settings: &AiSettings,
        request: &GenerationRequest,
        strict: bool,
    ) -> Result<GeneratedBatch, ProviderError> {
        let prompt_text = if strict {
            prompt::build_strict_prompt(request)
        } else {
            prompt::build_prompt(request)
        };

        let data = self
            .generate_with_fallbacks(settings, &prompt_text, strict)
            .await?;

        let text =
            extract_text(&data).ok_or(ProviderError::EmptyResponse(ProviderKind::Gemini))?;

        let questions = parser::parse_questions(&text)?;
        let mut batch = GeneratedBatch::new(questions);
        if let Some(usage) = token_usage(&data) {
            batch = batch.with_usage(usage);
        }
        Ok(batch)
    }

    #[instrument(skip(self, settings))]
    async fn list_models(&self, settings: &AiSettings) -> Result<Vec<String>, ProviderError> {
        let api_key = Self::require_key(settings)?;

        debug!("Listing Gemini models");

        // v1 first, v1beta as fallback
        let mut response = self
            .http
            .get(format!("{GEMINI_API_BASE}/v1/models"))
            .query(&[("key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            response = self
                .http
                .get(format!("{GEMINI_API_BASE}/v1beta/models"))
                .query(&[("key", api_key)])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::Http {
                    provider: ProviderKind::Gemini,
                    status: status.as_u16(),
                    body,
                });
            }
        }

        let body = response.text().await?;
        let models: GeminiModelsResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse models response");
            ProviderError::InvalidJson(format!("response envelope: {e}"))
        })?;

        // Keep models that can generateContent, strip the resource prefix,
        // dedupe and sort.
        let names: BTreeSet<String> = models
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .as_ref()
                    .is_none_or(|methods| methods.iter().any(|g| g == "generateContent"))
            })
            .filter_map(|m| m.name)
            .filter_map(|name| name.strip_prefix("models/").map(String::from))
            .collect();

        Ok(names.into_iter().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_primary_shape() {
        let data = json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"questions\": []}"}]}}
            ]
        });
        assert_eq!(extract_text(&data), Some("{\"questions\": []}".to_string()));
    }

    #[test]
    fn test_extract_text_fallback_shapes() {
        let indexed = json!({
            "candidates": [{"content": [{"text": "payload"}]}]
        });
        assert_eq!(extract_text(&indexed), Some("payload".to_string()));

        let string_value = json!({
            "candidates": [{"content": [{"string_value": "payload"}]}]
        });
        assert_eq!(extract_text(&string_value), Some("payload".to_string()));

        let flat = json!({
            "candidates": [{"content": {"text": "payload"}}]
        });
        assert_eq!(extract_text(&flat), Some("payload".to_string()));

        let top_level = json!({"text": "payload"});
        assert_eq!(extract_text(&top_level), Some("payload".to_string()));
    }

    #[test]
    fn test_extract_text_empty() {
        assert_eq!(extract_text(&json!({})), None);
        assert_eq!(extract_text(&json!({"candidates": []})), None);
        assert_eq!(
            extract_text(&json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]})),
            None
        );
    }

    #[test]
    fn test_token_usage_from_metadata() {
        let data = json!({
            "usageMetadata": {"promptTokenCount": 310, "candidatesTokenCount": 190}
        });
        let usage = token_usage(&data).unwrap();
        assert_eq!(usage.prompt_tokens, Some(310));
        assert_eq!(usage.completion_tokens, Some(190));

        assert!(token_usage(&json!({})).is_none());
        assert!(token_usage(&json!({"usageMetadata": {}})).is_none());
    }

    #[test]
    fn test_fallback_model_id_strips_latest() {
        assert_eq!(fallback_model_id("gemini-1.5-flash-latest"), "gemini-1.5-flash");
        assert_eq!(fallback_model_id("gemini-1.5-pro"), "gemini-1.5-pro");
    }

    #[test]
    fn test_generate_url() {
        assert_eq!(
            GeminiAdapter::generate_url("v1", "gemini-1.5-flash-latest"),
            "https://generativelanguage.googleapis.com/v1/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_request_body_mime_hint_omitted_when_disabled() {
        let with_mime = serde_json::to_value(GenerateContentRequest::new("p", false, true)).unwrap();
        assert_eq!(
            with_mime["generationConfig"]["responseMimeType"],
            "application/json"
        );

        let without = serde_json::to_value(GenerateContentRequest::new("p", true, false)).unwrap();
        assert!(without["generationConfig"].get("responseMimeType").is_none());
        let temp = without["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_parse_models_response_filters_and_strips() {
        let json = r#"{
            "models": [
                {"name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent"]},
                {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]},
                {"name": "models/gemini-1.5-pro"},
                {"name": "gemini-weird-name", "supportedGenerationMethods": ["generateContent"]}
            ]
        }"#;

        let models: GeminiModelsResponse = serde_json::from_str(json).unwrap();
        let names: Vec<String> = models
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .as_ref()
                    .is_none_or(|methods| methods.iter().any(|g| g == "generateContent"))
            })
            .filter_map(|m| m.name)
            .filter_map(|name| name.strip_prefix("models/").map(String::from))
            .collect();

        assert_eq!(names, vec!["gemini-1.5-flash", "gemini-1.5-pro"]);
    }
}
