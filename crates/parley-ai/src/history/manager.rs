//! MessageLog struct and in-memory conversation operations.

use tracing::trace;

use crate::{Message, Role};

use super::types::{LogError, SeedPolicy, UsageMetrics};

/// Ordered role/content history for one conversation.
///
/// Insertion order is conversation order and is replayed unchanged to
/// the remote model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    pub(super) messages: Vec<Message>,
}

impl MessageLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log starting with a single system message.
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(seed)],
        }
    }

    pub fn from_seed(policy: &SeedPolicy) -> Self {
        match policy.seed_text() {
            Some(text) => Self::with_seed(text),
            None => Self::new(),
        }
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
        trace!(role = %role, count = self.messages.len(), "message appended");
    }

    /// Append with a role given as a string, rejecting anything outside
    /// `system`, `user`, and `assistant`.
    pub fn try_append(&mut self, role: &str, content: impl Into<String>) -> Result<(), LogError> {
        let role: Role = role.parse()?;
        self.append(role, content);
        Ok(())
    }

    /// The messages as sent to the remote model, in append order.
    pub fn to_wire_format(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn usage_metrics(&self) -> UsageMetrics {
        self.messages
            .iter()
            .fold(UsageMetrics::default(), |mut acc, msg| {
                acc.message_count += 1;
                acc.approx_token_count += msg.content.split_whitespace().count();
                acc.char_count += msg.content.chars().count();
                acc
            })
    }

    /// Get the full conversation history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
