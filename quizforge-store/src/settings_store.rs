//! Persisted AI settings store.
//!
//! Wraps [`AiSettings`] with load/save behavior: settings are restored from
//! the config file at startup and rewritten on every mutation. Persistence
//! is a convenience, not a correctness requirement, so write failures are
//! logged and swallowed.

use quizforge_core::{AiSettings, ProviderKind};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::persistence::{default_settings_path, load_json, save_json};

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent store for [`AiSettings`].
pub struct SettingsStore {
    settings: RwLock<AiSettings>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store with default settings, without touching disk.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: RwLock::new(AiSettings::default()),
            path,
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path, falling back to defaults when the file is
    /// missing or unreadable.
    pub async fn load(path: PathBuf) -> Self {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading AI settings");
            match load_json::<AiSettings>(&path).await {
                Ok(mut settings) => {
                    // A partially written file may lack a model; re-apply
                    // the provider default to keep the invariant.
                    if settings.model.trim().is_empty() {
                        settings.model = settings.provider.default_model().to_string();
                    }
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load settings, using defaults");
                    AiSettings::default()
                }
            }
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            AiSettings::default()
        };

        Self {
            settings: RwLock::new(settings),
            path,
        }
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> AiSettings {
        self.settings.read().await.clone()
    }

    /// Applies a mutation and persists the result best-effort.
    async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut AiSettings),
    {
        let snapshot = {
            let mut settings = self.settings.write().await;
            f(&mut settings);
            settings.clone()
        };
        if let Err(e) = save_json(&self.path, &snapshot).await {
            warn!(error = %e, "Failed to persist settings");
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Sets the provider, resetting the model to that provider's default.
    pub async fn set_provider(&self, provider: ProviderKind) {
        self.update(|s| {
            s.provider = provider;
            s.model = provider.default_model().to_string();
        })
        .await;
    }

    /// Sets the API key (trimmed).
    pub async fn set_api_key(&self, key: &str) {
        self.update(|s| s.api_key = key.trim().to_string()).await;
    }

    /// Sets the model id (trimmed).
    pub async fn set_model(&self, model: &str) {
        self.update(|s| s.model = model.trim().to_string()).await;
    }

    /// Sets the endpoint override; empty or whitespace clears it.
    pub async fn set_endpoint(&self, endpoint: Option<&str>) {
        self.update(|s| {
            s.endpoint = endpoint
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from);
        })
        .await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("settings.json")
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(temp_store_path(&dir)).await;

        let settings = store.get().await;
        assert_eq!(settings.provider, ProviderKind::OpenAI);
        assert_eq!(settings.model, "gpt-4o-mini");
        assert!(settings.api_key.is_empty());
    }

    #[tokio::test]
    async fn test_mutations_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);

        let store = SettingsStore::load(path.clone()).await;
        store.set_provider(ProviderKind::Claude).await;
        store.set_api_key("  sk-ant-123  ").await;
        store.set_model("claude-3-5-sonnet-20240620").await;

        let reloaded = SettingsStore::load(path).await;
        let settings = reloaded.get().await;
        assert_eq!(settings.provider, ProviderKind::Claude);
        assert_eq!(settings.api_key, "sk-ant-123");
        assert_eq!(settings.model, "claude-3-5-sonnet-20240620");
    }

    #[tokio::test]
    async fn test_provider_change_resets_model() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(temp_store_path(&dir)).await;

        store.set_model("gpt-4o").await;
        store.set_provider(ProviderKind::Gemini).await;

        let settings = store.get().await;
        assert_eq!(settings.model, "gemini-1.5-flash-latest");
    }

    #[tokio::test]
    async fn test_endpoint_cleared_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(temp_store_path(&dir)).await;

        store.set_endpoint(Some("https://proxy.example.com")).await;
        assert_eq!(
            store.get().await.endpoint,
            Some("https://proxy.example.com".to_string())
        );

        store.set_endpoint(Some("   ")).await;
        assert_eq!(store.get().await.endpoint, None);

        store.set_endpoint(None).await;
        assert_eq!(store.get().await.endpoint, None);
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);
        tokio::fs::write(&path, "not json {{{").await.unwrap();

        let store = SettingsStore::load(path).await;
        let settings = store.get().await;
        assert_eq!(settings.provider, ProviderKind::OpenAI);
    }

    #[tokio::test]
    async fn test_loaded_empty_model_gets_provider_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);
        tokio::fs::write(
            &path,
            r#"{"provider": "gemini", "api_key": "k", "model": "", "endpoint": null}"#,
        )
        .await
        .unwrap();

        let store = SettingsStore::load(path).await;
        let settings = store.get().await;
        assert_eq!(settings.provider, ProviderKind::Gemini);
        assert_eq!(settings.model, "gemini-1.5-flash-latest");
    }

    #[tokio::test]
    async fn test_partial_file_fills_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);
        tokio::fs::write(&path, r#"{"provider": "claude"}"#).await.unwrap();

        let store = SettingsStore::load(path).await;
        let settings = store.get().await;
        assert_eq!(settings.provider, ProviderKind::Claude);
        assert_eq!(settings.model, "claude-3-haiku-20240307");
        assert!(settings.api_key.is_empty());
    }
}
