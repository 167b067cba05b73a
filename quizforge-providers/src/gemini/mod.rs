//! Gemini provider implementation.
//!
//! Talks to the Generative Language API:
//!
//! ```text
//! POST https://generativelanguage.googleapis.com/v1/models/<model>:generateContent?key=<key>
//! {"contents": [...], "generationConfig": {"temperature", "responseMimeType"}}
//! ```
//!
//! ## Fallback Chain
//!
//! Gemini deployments disagree about the JSON response-MIME hint and about
//! which API version serves which model, so a failed call walks a chain:
//!
//! 1. Configured endpoint (or v1) with `responseMimeType: application/json`
//! 2. On HTTP 400: same endpoint without the MIME hint
//! 3. On HTTP 404 (from either step): the v1beta endpoint with the model
//!    id's `-latest` suffix stripped, no MIME hint
//!
//! Failure is reported only after the chain is exhausted; the message
//! records every attempt's error for diagnosis.

// Modules
mod api;

// Re-exports
pub use api::GeminiAdapter;
