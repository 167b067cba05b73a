// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Quizforge Store
//!
//! Settings persistence and generation orchestration for quizforge.
//!
//! This crate provides:
//!
//! - **SettingsStore**: Persisted AI provider settings
//! - **GenerationStore**: Two-phase generation orchestration with status
//!   tracking
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use quizforge_store::GenerationStore;
//! use quizforge_core::GenerationRequest;
//!
//! let store = GenerationStore::load_default().await;
//! store.settings().set_api_key("sk-...").await;
//!
//! let questions = store.generate_questions(&GenerationRequest::new(5)).await;
//! if questions.is_empty() {
//!     if let Some(error) = store.status().await.last_error {
//!         eprintln!("generation failed: {error}");
//!     }
//! }
//! ```

pub mod error;
pub mod generation;
pub mod persistence;
pub mod settings_store;

pub use error::StoreError;
pub use generation::{GenerationStatus, GenerationStore};
pub use persistence::{default_config_dir, default_settings_path, load_json, save_json};
pub use settings_store::SettingsStore;
