//! Models command - list models available to the configured provider.

use anyhow::{bail, Result};
use quizforge_store::GenerationStore;
use tracing::info;

use crate::{Cli, OutputFormat};

/// Runs the models command.
pub async fn run(cli: &Cli) -> Result<()> {
    let store = GenerationStore::load_default().await;
    let settings = store.settings().get().await;

    info!(provider = %settings.provider, "Listing models");

    let models = match store.list_models().await {
        Ok(models) => models,
        Err(e) => bail!("{e}"),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("{} models ({}):", settings.provider, models.len());
            for model in &models {
                let marker = if *model == settings.effective_model() { "*" } else { " " };
                println!(" {marker} {model}");
            }
        }
        OutputFormat::Json => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&models)?
            } else {
                serde_json::to_string(&models)?
            };
            println!("{output}");
        }
    }

    Ok(())
}
