//! Validate command - check the current configuration.

use anyhow::Result;
use quizforge_store::GenerationStore;

use crate::{Cli, OutputFormat};

/// Runs the validate command.
pub async fn run(cli: &Cli) -> Result<()> {
    let store = GenerationStore::load_default().await;
    let result = store.validate_settings().await;

    match cli.format {
        OutputFormat::Text => match &result {
            Ok(()) => println!("Configuration is valid."),
            Err(reason) => println!("Configuration is invalid: {reason}"),
        },
        OutputFormat::Json => {
            let output = match &result {
                Ok(()) => serde_json::json!({"valid": true}),
                Err(reason) => {
                    serde_json::json!({"valid": false, "reason": reason.to_string()})
                }
            };
            if cli.pretty {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{output}");
            }
        }
    }

    // Invalid settings are a reported state, not a crash
    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
