//! Conversation session configuration types.

use serde::{Deserialize, Serialize};

/// How a new conversation log is seeded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SeedMode {
    /// Start with no messages.
    #[default]
    None,
    /// Start with a generic placeholder system message.
    Placeholder,
    /// Start with `seed_text` as the system message.
    Custom,
}

/// Session settings: model selection and log seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub model: String,
    pub seed: SeedMode,
    pub seed_text: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            seed: SeedMode::None,
            seed_text: String::new(),
        }
    }
}
