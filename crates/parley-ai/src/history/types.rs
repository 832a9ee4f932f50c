//! Message log value types, seeding policy, and errors.

use std::path::PathBuf;

use parley_config::{SeedMode, SessionConfig};

/// System message used by [`SeedPolicy::Placeholder`].
pub const PLACEHOLDER_SEED: &str = "Starting message";

/// How a fresh `MessageLog` is seeded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// No messages.
    #[default]
    Empty,
    /// A single system message reading [`PLACEHOLDER_SEED`].
    Placeholder,
    /// A single system message with the given text.
    Text(String),
}

impl SeedPolicy {
    /// Map the `[session]` config section onto a policy.
    pub fn from_settings(config: &SessionConfig) -> Self {
        match config.seed {
            SeedMode::None => SeedPolicy::Empty,
            SeedMode::Placeholder => SeedPolicy::Placeholder,
            SeedMode::Custom => SeedPolicy::Text(config.seed_text.clone()),
        }
    }

    pub(crate) fn seed_text(&self) -> Option<&str> {
        match self {
            SeedPolicy::Empty => None,
            SeedPolicy::Placeholder => Some(PLACEHOLDER_SEED),
            SeedPolicy::Text(text) => Some(text),
        }
    }
}

/// Lightweight size metrics derived from a log's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageMetrics {
    pub message_count: usize,
    /// Whitespace-delimited word count over all content.
    pub approx_token_count: usize,
    /// Unicode scalar values over all content.
    pub char_count: usize,
}

/// Result of deleting a persisted log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// Nothing existed at the path.
    Absent,
}

/// Errors from message log operations. All leave the log unchanged.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid role: {0:?} (expected system, user, or assistant)")]
    InvalidRole(String),

    #[error("conversation file not found: {0}")]
    NotFound(PathBuf),

    #[error("conversation file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to read conversation file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write conversation file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("failed to delete conversation file {path}: {reason}")]
    DeleteFailed { path: PathBuf, reason: String },
}
