//! Conversation history.
//!
//! A `MessageLog` holds the ordered messages of one conversation, derives
//! usage metrics from them, and persists them as JSON.

mod manager;
mod persistence;
mod types;

pub use manager::MessageLog;
pub use types::{DeleteOutcome, LogError, SeedPolicy, UsageMetrics, PLACEHOLDER_SEED};
