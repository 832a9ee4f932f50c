//! OpenAI-compatible chat-completions client.
//!
//! Implements the `AiClient` trait against `POST {base_url}/chat/completions`
//! with bearer authentication. Works with any server that speaks the same
//! wire format; the legacy `functions`/`function_call` request style can be
//! selected for servers that predate `tools`.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::{OpenAiConfig, DEFAULT_BASE_URL};
