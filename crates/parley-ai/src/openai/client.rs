//! Chat-completions client struct, request building, and response parsing.

use parley_config::{FunctionStyle, ProviderConfig};

use crate::tools::{to_openai_function, to_openai_tool};
use crate::{AiError, AiResponse, CompletionRequest, TokenUsage, ToolCall};

use super::config::OpenAiConfig;

/// Longest slice of an error body kept in `AiError` messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NotConfigured(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Build from `[provider]`, reading the credential from the environment.
    pub fn from_settings(settings: &ProviderConfig) -> Result<Self, AiError> {
        Self::new(OpenAiConfig::from_settings(settings)?)
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Build the JSON request body for the chat-completions API.
    pub(crate) fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let msgs: Vec<_> = request
            .messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.as_str(),
                    "content": msg.content,
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": msgs,
        });

        if request.tools.is_empty() {
            return body;
        }

        match self.config.function_style {
            FunctionStyle::Tools => {
                let defs: Vec<_> = request.tools.iter().map(to_openai_tool).collect();
                body["tools"] = serde_json::json!(defs);
                if let Some(ref name) = request.tool_choice {
                    body["tool_choice"] = serde_json::json!({
                        "type": "function",
                        "function": { "name": name },
                    });
                }
            }
            FunctionStyle::Functions => {
                let defs: Vec<_> = request.tools.iter().map(to_openai_function).collect();
                body["functions"] = serde_json::json!(defs);
                if let Some(ref name) = request.tool_choice {
                    body["function_call"] = serde_json::json!({ "name": name });
                }
            }
        }

        body
    }
}

/// Parse a chat-completions response body.
///
/// Only the first choice is read. Function calls are collected from both
/// `message.tool_calls` and the legacy `message.function_call`.
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<AiResponse, AiError> {
    let first = json["choices"]
        .as_array()
        .ok_or_else(|| AiError::ParseError("no choices in response".to_string()))?
        .first()
        .ok_or_else(|| AiError::ParseError("empty choices".to_string()))?;

    let message = &first["message"];
    if !message.is_object() {
        return Err(AiError::ParseError("first choice has no message".to_string()));
    }

    let content = message["content"].as_str().map(String::from);

    let mut tool_calls: Vec<ToolCall> = message["tool_calls"]
        .as_array()
        .map(|calls| {
            calls
                .iter()
                .filter(|c| c["function"].is_object())
                .map(|c| ToolCall {
                    id: c["id"].as_str().unwrap_or("").to_string(),
                    name: c["function"]["name"].as_str().unwrap_or("").to_string(),
                    arguments: arguments_text(&c["function"]["arguments"]),
                })
                .collect()
        })
        .unwrap_or_default();

    if let Some(fc) = message.get("function_call").filter(|fc| fc.is_object()) {
        tool_calls.push(ToolCall {
            id: String::new(),
            name: fc["name"].as_str().unwrap_or("").to_string(),
            arguments: arguments_text(&fc["arguments"]),
        });
    }

    let usage = TokenUsage {
        input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
        output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
    };

    Ok(AiResponse {
        content,
        tool_calls,
        usage,
    })
}

/// Arguments normally arrive as a JSON-encoded string; some compatible
/// servers send the object inline.
fn arguments_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Map a non-success HTTP status and its body onto an `AiError`.
pub(crate) fn classify_status(status: reqwest::StatusCode, body: &str) -> AiError {
    let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    match status {
        reqwest::StatusCode::TOO_MANY_REQUESTS => AiError::RateLimited,
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            AiError::Unauthorized(format!("HTTP {status}: {body}"))
        }
        _ => AiError::ApiError(format!("HTTP {status}: {body}")),
    }
}

/// Map a failed `send()` onto an `AiError`.
pub(crate) fn classify_send_error(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Timeout
    } else {
        AiError::NetworkError(err.to_string())
    }
}
