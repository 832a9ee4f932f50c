//! Completion outcomes and call phases.

use std::collections::BTreeMap;
use std::fmt;

/// Outcome of one completion call. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Text(String),
    /// Field name to extracted value.
    Structured(BTreeMap<String, String>),
    Failure(FailureReason),
}

impl CompletionResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, CompletionResult::Failure(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            CompletionResult::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            CompletionResult::Structured(fields) => fields.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            CompletionResult::Failure(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Why a completion produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    #[error("transport failure: {detail}")]
    Transport { detail: String },
    #[error("malformed response: {detail}")]
    MalformedResponse { detail: String },
    #[error("schema mismatch: {detail}")]
    SchemaMismatch { detail: String },
    #[error("missing field: {field}")]
    MissingField { field: String },
}

impl FailureReason {
    /// Stable machine-readable code for this reason.
    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::Transport { .. } => "transport",
            FailureReason::MalformedResponse { .. } => "malformed_response",
            FailureReason::SchemaMismatch { .. } => "schema_mismatch",
            FailureReason::MissingField { .. } => "missing_field",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPhase {
    Idle,
    RequestBuilt,
    AwaitingRemote,
    Completed,
    Failed,
}

impl CompletionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionPhase::Idle => "idle",
            CompletionPhase::RequestBuilt => "request_built",
            CompletionPhase::AwaitingRemote => "awaiting_remote",
            CompletionPhase::Completed => "completed",
            CompletionPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for CompletionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
