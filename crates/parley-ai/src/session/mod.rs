//! Completion sessions.
//!
//! A `CompletionSession` turns a `MessageLog` into a request, issues it
//! through an `AiClient`, and normalizes the reply either as free text or
//! as a single named field extracted through a forced function call.

mod chat;
mod manager;
mod types;

pub use manager::CompletionSession;
pub use types::{CompletionPhase, CompletionResult, FailureReason};

#[cfg(test)]
mod tests;
