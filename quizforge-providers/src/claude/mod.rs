//! Claude (Anthropic) provider implementation.
//!
//! Talks to the Messages API:
//!
//! ```text
//! POST https://api.anthropic.com/v1/messages
//! x-api-key: <key>
//! anthropic-version: 2023-06-01
//! {"model", "max_tokens", "temperature", "system", "messages": [...]}
//! ```
//!
//! Responses carry an array of content blocks; the text of the first block
//! is the payload. Model listing falls back to a static list of known
//! Claude 3 models when the endpoint is unreachable.

// Modules
mod api;

// Re-exports
pub use api::{ClaudeAdapter, MessagesResponse};
