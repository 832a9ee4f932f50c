//! Async completion methods for CompletionSession.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{AiError, AiResponse, MessageLog};

use super::manager::CompletionSession;
use super::types::{CompletionPhase, CompletionResult, FailureReason};

impl CompletionSession {
    /// Complete the conversation and return the first choice's text.
    ///
    /// The log is only read; appending the reply is up to the caller.
    pub async fn complete(&self, log: &MessageLog) -> CompletionResult {
        self.enter(CompletionPhase::Idle);
        let request = self.build_plain_request(log);
        self.enter(CompletionPhase::RequestBuilt);

        self.enter(CompletionPhase::AwaitingRemote);
        let result = match self.client.send_message(&request).await {
            Ok(response) => {
                self.record_usage(&response);
                match response.content {
                    Some(text) => CompletionResult::Text(text),
                    None => CompletionResult::Failure(FailureReason::MalformedResponse {
                        detail: "first choice has no text content".into(),
                    }),
                }
            }
            Err(err) if err.is_transport() => CompletionResult::Failure(transport_failure(err)),
            Err(err) => CompletionResult::Failure(FailureReason::MalformedResponse {
                detail: err.to_string(),
            }),
        };

        self.finish(result)
    }

    /// Structured extraction into the session's default field.
    pub async fn complete_structured(&self, log: &MessageLog, input: &str) -> CompletionResult {
        let field = self.structured.field.clone();
        self.complete_structured_field(log, input, &field).await
    }

    /// Send the log plus `input` as an uncommitted user message, force the
    /// extraction function, and return `{field: value}` from its arguments.
    pub async fn complete_structured_field(
        &self,
        log: &MessageLog,
        input: &str,
        field: &str,
    ) -> CompletionResult {
        self.enter(CompletionPhase::Idle);
        let request = self.build_structured_request(log, input, field);
        self.enter(CompletionPhase::RequestBuilt);

        self.enter(CompletionPhase::AwaitingRemote);
        let result = match self.client.send_message(&request).await {
            Ok(response) => {
                self.record_usage(&response);
                match extract_field(&response, &self.structured.function_name, field) {
                    Ok(fields) => CompletionResult::Structured(fields),
                    Err(reason) => CompletionResult::Failure(reason),
                }
            }
            Err(err) if err.is_transport() => CompletionResult::Failure(transport_failure(err)),
            Err(err) => CompletionResult::Failure(FailureReason::SchemaMismatch {
                detail: err.to_string(),
            }),
        };

        self.finish(result)
    }

    fn record_usage(&self, response: &AiResponse) {
        debug!(
            model = %self.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            total_tokens = response.usage.total_tokens(),
            "completion usage"
        );
    }

    fn finish(&self, result: CompletionResult) -> CompletionResult {
        match result.failure() {
            Some(reason) => {
                self.enter(CompletionPhase::Failed);
                warn!(model = %self.model, code = reason.code(), %reason, "completion failed");
            }
            None => self.enter(CompletionPhase::Completed),
        }
        result
    }
}

fn transport_failure(err: AiError) -> FailureReason {
    FailureReason::Transport {
        detail: err.to_string(),
    }
}

/// Pull `field` out of the forced call to `function`.
fn extract_field(
    response: &AiResponse,
    function: &str,
    field: &str,
) -> Result<BTreeMap<String, String>, FailureReason> {
    let call = response
        .tool_calls
        .iter()
        .find(|call| call.name == function)
        .ok_or_else(|| FailureReason::SchemaMismatch {
            detail: format!("model did not call {function}"),
        })?;

    let args: serde_json::Value =
        serde_json::from_str(&call.arguments).map_err(|e| FailureReason::SchemaMismatch {
            detail: format!("arguments are not valid JSON: {e}"),
        })?;

    let args = args.as_object().ok_or_else(|| FailureReason::SchemaMismatch {
        detail: "arguments are not a JSON object".into(),
    })?;

    match args.get(field) {
        None => Err(FailureReason::MissingField {
            field: field.to_string(),
        }),
        Some(serde_json::Value::String(value)) => {
            Ok(BTreeMap::from([(field.to_string(), value.clone())]))
        }
        Some(_) => Err(FailureReason::SchemaMismatch {
            detail: format!("field {field} is not a string"),
        }),
    }
}
