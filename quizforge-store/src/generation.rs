//! Generation orchestration.
//!
//! [`GenerationStore`] drives a single logical generation at a time:
//! validate settings, dispatch to the configured provider's adapter, attempt
//! once with the normal prompt and once more in strict mode, and track
//! status for the UI. Errors never escape to the caller: the outcome is
//! always a question list (possibly empty) plus a stored, human-readable
//! last error.

use quizforge_core::{AiSettings, CoreError, GenerationRequest, Question, TokenUsage};
use quizforge_providers::{adapter_for, ProviderAdapter};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::settings_store::SettingsStore;

// ============================================================================
// Generation Status
// ============================================================================

/// Observable state of the most recent generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationStatus {
    /// True while a generation sequence is running.
    pub is_generating: bool,
    /// Human-readable error from the last failed attempt sequence. Cleared
    /// when the next attempt starts.
    pub last_error: Option<String>,
    /// Prompt tokens reported by the last successful attempt.
    pub last_prompt_tokens: Option<u64>,
    /// Completion tokens reported by the last successful attempt.
    pub last_completion_tokens: Option<u64>,
}

// ============================================================================
// Generation Store
// ============================================================================

/// Orchestrates question generation over the persisted settings.
pub struct GenerationStore {
    settings: SettingsStore,
    status: RwLock<GenerationStatus>,
}

impl GenerationStore {
    /// Creates a store over existing settings.
    pub fn new(settings: SettingsStore) -> Self {
        Self {
            settings,
            status: RwLock::new(GenerationStatus::default()),
        }
    }

    /// Creates a store with settings loaded from the default path.
    pub async fn load_default() -> Self {
        Self::new(SettingsStore::load_default().await)
    }

    /// Access to the underlying settings store.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Returns a snapshot of the current generation status.
    pub async fn status(&self) -> GenerationStatus {
        self.status.read().await.clone()
    }

    /// Clears the last error and token counts.
    pub async fn reset_errors(&self) {
        let mut status = self.status.write().await;
        status.last_error = None;
        status.last_prompt_tokens = None;
        status.last_completion_tokens = None;
    }

    /// Validates the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSettings`] with the user-visible reason.
    pub async fn validate_settings(&self) -> Result<(), StoreError> {
        let settings = self.settings.get().await;
        settings
            .validate()
            .map_err(|e| StoreError::InvalidSettings(invalid_reason(e)))
    }

    /// Generates questions for a request.
    ///
    /// Returns an empty list on failure; the reason is retained in
    /// [`GenerationStatus::last_error`] until the next attempt starts.
    pub async fn generate_questions(&self, request: &GenerationRequest) -> Vec<Question> {
        self.status.write().await.last_error = None;

        let settings = self.settings.get().await;
        if let Err(e) = settings.validate() {
            let reason = invalid_reason(e);
            warn!(reason = %reason, "Settings invalid, skipping generation");
            self.status.write().await.last_error = Some(reason);
            return Vec::new();
        }

        let adapter = adapter_for(settings.provider);
        self.generate_with_adapter(adapter.as_ref(), &settings, request)
            .await
    }

    /// Runs the two-phase attempt sequence against a specific adapter.
    ///
    /// Split from [`Self::generate_questions`] so the retry policy can be
    /// exercised against a mock adapter.
    async fn generate_with_adapter(
        &self,
        adapter: &dyn ProviderAdapter,
        settings: &AiSettings,
        request: &GenerationRequest,
    ) -> Vec<Question> {
        {
            let mut status = self.status.write().await;
            status.last_error = None;
            status.is_generating = true;
        }
        let questions = self.run_attempts(adapter, settings, request).await;
        self.status.write().await.is_generating = false;
        questions
    }

    async fn run_attempts(
        &self,
        adapter: &dyn ProviderAdapter,
        settings: &AiSettings,
        request: &GenerationRequest,
    ) -> Vec<Question> {
        // First attempt: normal prompt and temperature.
        let initial_error = match adapter.generate(settings, request, false).await {
            Ok(batch) => {
                if !batch.questions.is_empty() {
                    info!(count = batch.questions.len(), "Generation succeeded");
                    self.record_usage(batch.usage).await;
                    return batch.questions;
                }
                debug!("First attempt returned no questions, retrying strictly");
                None
            }
            Err(e) => {
                warn!(error = %e, "First attempt failed, retrying strictly");
                Some(e)
            }
        };

        // Second attempt: strict prompt, lower temperature.
        match adapter.generate(settings, request, true).await {
            Ok(batch) => {
                info!(count = batch.questions.len(), "Strict retry completed");
                self.record_usage(batch.usage).await;
                batch.questions
            }
            Err(second) => {
                let message = match initial_error {
                    Some(first) => format!("{second} (initial error: {first})"),
                    None => second.to_string(),
                };
                warn!(error = %message, "Generation failed after strict retry");
                self.status.write().await.last_error = Some(message);
                Vec::new()
            }
        }
    }

    async fn record_usage(&self, usage: Option<TokenUsage>) {
        let mut status = self.status.write().await;
        status.last_prompt_tokens = usage.and_then(|u| u.prompt_tokens);
        status.last_completion_tokens = usage.and_then(|u| u.completion_tokens);
    }

    /// Lists the models available under the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSettings`] without any network activity
    /// when no API key is configured, or [`StoreError::Generation`] when the
    /// provider call fails.
    pub async fn list_models(&self) -> Result<Vec<String>, StoreError> {
        let settings = self.settings.get().await;
        if settings.api_key.trim().is_empty() {
            return Err(StoreError::InvalidSettings(
                "API key is required to list models.".to_string(),
            ));
        }

        let adapter = adapter_for(settings.provider);
        adapter
            .list_models(&settings)
            .await
            .map_err(|e| StoreError::Generation(e.to_string()))
    }
}

/// Extracts the user-visible reason from a settings validation failure.
fn invalid_reason(error: CoreError) -> String {
    match error {
        CoreError::InvalidConfig(reason) => reason,
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
