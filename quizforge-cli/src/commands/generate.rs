//! Generate command - produce quiz questions with the configured provider.

use anyhow::{bail, Result};
use quizforge_core::{GenerationRequest, QuizCategory, RequestedDifficulty};
use quizforge_store::GenerationStore;
use tracing::info;

use crate::{Cli, OutputFormat};

/// Arguments for the generate command.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Number of questions to generate.
    #[arg(long, short = 'n', default_value_t = 5)]
    pub count: usize,

    /// Category constraint (history, math, science, geography, literature, sports).
    #[arg(long, short)]
    pub category: Option<String>,

    /// Difficulty constraint (easy, medium, hard, mixed).
    #[arg(long, short, default_value = "mixed")]
    pub difficulty: String,

    /// Target language as a locale code (e.g. "en", "es", "fr").
    #[arg(long, short, default_value = "en")]
    pub language: String,
}

/// Runs the generate command.
pub async fn run(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let mut request = GenerationRequest::new(args.count).with_language(args.language.clone());

    if let Some(label) = &args.category {
        let Some(category) = QuizCategory::from_label(label) else {
            bail!(
                "Unknown category '{label}'. Known categories: {}",
                QuizCategory::all()
                    .iter()
                    .map(|c| c.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        };
        request = request.with_category(category);
    }

    let Some(difficulty) = RequestedDifficulty::from_label(&args.difficulty) else {
        bail!("Unknown difficulty '{}'. Use easy, medium, hard, or mixed.", args.difficulty);
    };
    request = request.with_difficulty(difficulty);

    info!(count = request.count, "Generating questions");

    let store = GenerationStore::load_default().await;
    let questions = store.generate_questions(&request).await;
    let status = store.status().await;

    if questions.is_empty() {
        let reason = status
            .last_error
            .unwrap_or_else(|| "provider returned no questions".to_string());
        bail!("Generation failed: {reason}");
    }

    match cli.format {
        OutputFormat::Text => {
            for question in &questions {
                println!(
                    "{}. [{}/{}] {}",
                    question.id, question.category, question.difficulty, question.question
                );
                for (index, option) in question.options.iter().enumerate() {
                    let marker = if index == question.correct_answer { "*" } else { " " };
                    println!("   {marker} {}) {option}", (b'a' + u8::try_from(index)?) as char);
                }
                if !question.explanation.is_empty() {
                    println!("   ({})", question.explanation);
                }
                println!();
            }
            if let (Some(prompt), Some(completion)) =
                (status.last_prompt_tokens, status.last_completion_tokens)
            {
                println!("Tokens: {prompt} prompt / {completion} completion");
            }
        }
        OutputFormat::Json => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&questions)?
            } else {
                serde_json::to_string(&questions)?
            };
            println!("{output}");
        }
    }

    Ok(())
}
