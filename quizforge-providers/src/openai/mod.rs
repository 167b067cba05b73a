//! OpenAI provider implementation.
//!
//! Talks to the Chat Completions API (or an OpenAI-compatible endpoint
//! configured via the settings override):
//!
//! ```text
//! POST https://api.openai.com/v1/chat/completions
//! Authorization: Bearer <key>
//! {"model", "temperature", "messages": [...], "response_format": {"type": "json_object"}}
//! ```
//!
//! JSON-object output mode is always requested; models that do not support
//! it ignore the field, which is why the extracted text still goes through
//! the fence-stripping normalizer.

// Modules
mod api;

// Re-exports
pub use api::{ChatCompletionResponse, OpenAiAdapter};
