// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Quizforge Core
//!
//! Core types and models for the quizforge question generator.
//!
//! This crate provides the foundational abstractions used across all other
//! quizforge crates, including:
//!
//! - Domain models (providers, questions, generation requests)
//! - Error types
//!
//! ## Key Types
//!
//! ### Provider Types
//! - [`ProviderKind`] - Enum of the supported text-generation providers
//! - [`AiSettings`] - User-supplied provider configuration
//!
//! ### Quiz Types
//! - [`Question`] - The canonical, validated quiz question shape
//! - [`QuizCategory`] - The fixed set of quiz categories
//! - [`Difficulty`] - Per-question difficulty
//!
//! ### Generation Types
//! - [`GenerationRequest`] - What to generate (count, category, difficulty, language)
//! - [`RequestedDifficulty`] - Difficulty constraint for a request (incl. mixed)
//! - [`GeneratedBatch`] - A validated batch of questions plus token accounting
//! - [`TokenUsage`] - Best-effort prompt/completion token counts

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Provider types
    AiSettings,
    ProviderKind,
    // Quiz types
    Difficulty,
    Question,
    QuizCategory,
    // Generation types
    GeneratedBatch,
    GenerationRequest,
    RequestedDifficulty,
    TokenUsage,
};
