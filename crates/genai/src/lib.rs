//! Generative-language client and the prompt/response adapter.
//!
//! Wraps the Gemini REST API behind the [`client::TextGenerator`] trait,
//! builds per-mode prompts, extracts and validates JSON payloads from
//! free-form model replies, and serves named fallback literals when
//! generation or parsing fails.

pub mod client;
pub mod extract;
pub mod fallback;
pub mod prompts;
pub mod service;
pub mod types;
