//! CompletionSession struct and request construction.

use parley_config::{ParleyConfig, StructuredConfig};
use tracing::debug;

use crate::openai::OpenAiClient;
use crate::{AiClient, AiError, CompletionRequest, Message, MessageLog, ToolDefinition};

use super::types::CompletionPhase;

/// Issues completions for a `MessageLog` through an `AiClient`.
///
/// Holds only immutable state, so one session can serve concurrent calls.
pub struct CompletionSession {
    pub(super) client: Box<dyn AiClient>,
    pub(super) model: String,
    pub(super) structured: StructuredConfig,
}

impl CompletionSession {
    pub fn new(client: impl AiClient + 'static, model: impl Into<String>) -> Self {
        Self {
            client: Box::new(client),
            model: model.into(),
            structured: StructuredConfig::default(),
        }
    }

    /// An OpenAI-backed session built from a loaded config.
    ///
    /// The credential is read from the environment variable named by
    /// `provider.api_key_env`.
    pub fn from_config(config: &ParleyConfig) -> Result<Self, AiError> {
        let client = OpenAiClient::from_settings(&config.provider)?;
        Ok(Self::new(client, &config.session.model).with_structured(config.structured.clone()))
    }

    pub fn with_structured(mut self, structured: StructuredConfig) -> Self {
        self.structured = structured;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Field extracted by `complete_structured`.
    pub fn default_field(&self) -> &str {
        &self.structured.field
    }

    pub fn structured(&self) -> &StructuredConfig {
        &self.structured
    }

    pub(super) fn build_plain_request(&self, log: &MessageLog) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: log.to_wire_format(),
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    /// Log wire format plus the uncommitted input, with the extraction
    /// function declared over `field` and forced.
    pub(super) fn build_structured_request(
        &self,
        log: &MessageLog,
        input: &str,
        field: &str,
    ) -> CompletionRequest {
        let tool = ToolDefinition::from_settings(&self.structured, field);
        let mut messages = log.to_wire_format();
        messages.push(Message::user(input));
        CompletionRequest {
            model: self.model.clone(),
            messages,
            tool_choice: Some(tool.name.clone()),
            tools: vec![tool],
        }
    }

    pub(super) fn enter(&self, phase: CompletionPhase) {
        debug!(model = %self.model, %phase, "completion phase");
    }
}
