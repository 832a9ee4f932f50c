//! Conversation engine for Parley.
//!
//! Provides:
//! - `MessageLog`: ordered role/content history with JSON persistence
//! - `CompletionSession`: plain-text and structured (forced function call)
//!   completions over any `AiClient`
//! - `OpenAiClient`: chat-completions client for OpenAI-compatible endpoints

pub mod history;
pub mod openai;
pub mod session;
pub mod tools;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

pub use history::{DeleteOutcome, LogError, MessageLog, SeedPolicy, UsageMetrics};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use session::{CompletionPhase, CompletionResult, CompletionSession, FailureReason};
pub use tools::ToolDefinition;

/// Transport seam between a `CompletionSession` and a remote model.
///
/// One call is one request/response round trip; implementations must not
/// retry on their own.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, request: &CompletionRequest) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(LogError::InvalidRole(other.to_string())),
        }
    }
}

/// One request to the remote model, built fresh for every completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
    /// Name of the tool the model is forced to call, if any.
    pub tool_choice: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    /// Text of the first choice; `None` when the model answered only
    /// with a function call.
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded argument object exactly as the model produced it.
    pub arguments: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl AiError {
    /// Whether the remote call itself failed, as opposed to returning a
    /// body that could not be understood.
    pub fn is_transport(&self) -> bool {
        !matches!(self, AiError::ParseError(_))
    }
}
