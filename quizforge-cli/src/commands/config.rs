//! Config command - manage AI provider configuration.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use quizforge_core::ProviderKind;
use quizforge_store::{default_config_dir, default_settings_path, SettingsStore};

use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration (the API key is never printed).
    Show,

    /// Show configuration paths.
    Path,

    /// Set the provider (openai, gemini, claude). Resets the model to the
    /// provider's default.
    SetProvider {
        /// Provider CLI name.
        provider: String,
    },

    /// Set the API key for the selected provider.
    SetKey {
        /// The API key.
        key: String,
    },

    /// Set the model id.
    SetModel {
        /// Model id (e.g. "gpt-4o-mini").
        model: String,
    },

    /// Set a custom endpoint URL, or clear it by passing nothing.
    SetEndpoint {
        /// Full endpoint URL; omit to clear the override.
        endpoint: Option<String>,
    },
}

/// Runs the config command.
pub async fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::SetProvider { provider } => set_provider(provider).await,
        ConfigAction::SetKey { key } => set_key(key).await,
        ConfigAction::SetModel { model } => set_model(model).await,
        ConfigAction::SetEndpoint { endpoint } => set_endpoint(endpoint.as_deref()).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let store = SettingsStore::load_default().await;
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("Quizforge Configuration");
            println!("{}", "-".repeat(40));
            println!();
            println!("Provider: {}", settings.provider);
            println!("Model:    {}", settings.effective_model());
            println!(
                "API key:  {}",
                if settings.api_key.is_empty() { "<unset>" } else { "<set>" }
            );
            println!(
                "Endpoint: {}",
                settings.endpoint_override().unwrap_or("<default>")
            );
        }
        OutputFormat::Json => {
            // Serialize by hand so the key never reaches stdout
            let output = serde_json::json!({
                "provider": settings.provider.cli_name(),
                "model": settings.effective_model(),
                "api_key_set": !settings.api_key.is_empty(),
                "endpoint": settings.endpoint_override(),
            });
            if cli.pretty {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{output}");
            }
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = default_settings_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            println!("{paths}");
        }
    }

    Ok(())
}

async fn set_provider(name: &str) -> Result<()> {
    let provider = ProviderKind::from_cli_name(name).ok_or_else(|| {
        anyhow!(
            "Unknown provider '{name}'. Known providers: {}",
            ProviderKind::all()
                .iter()
                .map(|p| p.cli_name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    let store = SettingsStore::load_default().await;
    store.set_provider(provider).await;
    println!(
        "Provider set to {} (model reset to {})",
        provider,
        provider.default_model()
    );
    Ok(())
}

async fn set_key(key: &str) -> Result<()> {
    let store = SettingsStore::load_default().await;
    store.set_api_key(key).await;
    println!("API key updated.");
    Ok(())
}

async fn set_model(model: &str) -> Result<()> {
    let store = SettingsStore::load_default().await;
    store.set_model(model).await;
    println!("Model set to {}.", store.get().await.effective_model());
    Ok(())
}

async fn set_endpoint(endpoint: Option<&str>) -> Result<()> {
    let store = SettingsStore::load_default().await;
    store.set_endpoint(endpoint).await;
    match store.get().await.endpoint_override() {
        Some(url) => println!("Endpoint set to {url}."),
        None => println!("Endpoint override cleared."),
    }
    Ok(())
}
