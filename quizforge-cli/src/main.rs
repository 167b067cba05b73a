// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Quizforge CLI - AI quiz question generation from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Configure a provider
//! quizforge config set-provider openai
//! quizforge config set-key sk-...
//!
//! # Generate 5 mixed questions
//! quizforge generate
//!
//! # Generate 3 hard science questions in Spanish
//! quizforge generate --count 3 --category science --difficulty hard --language es
//!
//! # JSON output
//! quizforge generate --format json --pretty
//!
//! # List models available to the configured key
//! quizforge models
//!
//! # Check the configuration
//! quizforge validate
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, generate, models, validate};

// ============================================================================
// CLI Definition
// ============================================================================

/// Quizforge CLI - AI quiz question generation.
#[derive(Parser)]
#[command(name = "quizforge")]
#[command(about = "AI quiz question generation CLI")]
#[command(long_about = r#"
Quizforge generates multiple-choice quiz questions with an AI provider.

Supported providers:
  • OpenAI (openai)
  • Google Gemini (gemini)
  • Anthropic Claude (claude)

Examples:
  quizforge config set-provider gemini   # Pick a provider
  quizforge config set-key <api-key>     # Store its API key
  quizforge generate --count 5           # Generate questions
  quizforge generate --format json       # JSON output for scripting
  quizforge models                       # List available models
"#)]
#[command(version)]
#[command(author = "Quizforge Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate quiz questions.
    #[command(visible_alias = "g")]
    Generate(generate::GenerateArgs),

    /// List models available to the configured provider and key.
    #[command(visible_alias = "m")]
    Models,

    /// Manage AI provider configuration.
    Config(config::ConfigArgs),

    /// Validate the current configuration.
    Validate,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("quizforge=debug,info")
    } else {
        EnvFilter::new("quizforge=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Commands::Generate(args) => generate::run(&cli, args).await,
        Commands::Models => models::run(&cli).await,
        Commands::Config(args) => config::run(&cli, args).await,
        Commands::Validate => validate::run(&cli).await,
    }
}
