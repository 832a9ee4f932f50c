use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_config::{ParleyConfig, StructuredConfig};

use super::*;
use crate::{
    AiClient, AiError, AiResponse, CompletionRequest, MessageLog, Role, TokenUsage, ToolCall,
};

type Reply = Box<dyn Fn() -> Result<AiResponse, AiError> + Send + Sync>;

/// Returns a canned reply and records every request it receives.
struct StubClient {
    reply: Reply,
    seen: Arc<Mutex<Vec<CompletionRequest>>>,
}

#[async_trait]
impl AiClient for StubClient {
    async fn send_message(&self, request: &CompletionRequest) -> Result<AiResponse, AiError> {
        self.seen.lock().unwrap().push(request.clone());
        (self.reply)()
    }
}

fn session_with(
    reply: impl Fn() -> Result<AiResponse, AiError> + Send + Sync + 'static,
) -> (CompletionSession, Arc<Mutex<Vec<CompletionRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = StubClient {
        reply: Box::new(reply),
        seen: Arc::clone(&seen),
    };
    (CompletionSession::new(client, "gpt-test"), seen)
}

fn text_reply(text: &str) -> AiResponse {
    AiResponse {
        content: Some(text.to_string()),
        tool_calls: Vec::new(),
        usage: TokenUsage {
            input_tokens: 10,
            output_tokens: 2,
        },
    }
}

fn call_reply(name: &str, arguments: &str) -> AiResponse {
    AiResponse {
        content: None,
        tool_calls: vec![ToolCall {
            id: "call_0".into(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }],
        usage: TokenUsage::default(),
    }
}

fn conversation() -> MessageLog {
    let mut log = MessageLog::with_seed("You are terse.");
    log.append(Role::User, "Hello");
    log.append(Role::Assistant, "Hi.");
    log
}

fn reason_code(result: &CompletionResult) -> &'static str {
    result.failure().map(FailureReason::code).unwrap_or("none")
}

// -- plain text --

#[tokio::test]
async fn complete_returns_first_choice_text() {
    let (session, seen) = session_with(|| Ok(text_reply("Hi there")));
    let log = conversation();

    let result = session.complete(&log).await;
    assert_eq!(result, CompletionResult::Text("Hi there".into()));

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "gpt-test");
    assert_eq!(requests[0].messages, log.to_wire_format());
    assert!(requests[0].tools.is_empty());
    assert_eq!(requests[0].tool_choice, None);
}

#[tokio::test]
async fn complete_does_not_touch_the_log() {
    let (session, _) = session_with(|| Ok(text_reply("reply")));
    let log = conversation();
    let before = log.clone();
    session.complete(&log).await;
    assert_eq!(log, before);
}

#[tokio::test]
async fn transport_errors_map_to_transport() {
    let errors: Vec<fn() -> AiError> = vec![
        || AiError::NetworkError("connection refused".into()),
        || AiError::Timeout,
        || AiError::RateLimited,
        || AiError::Unauthorized("HTTP 401".into()),
        || AiError::ApiError("HTTP 500: boom".into()),
    ];
    for make in errors {
        let (session, _) = session_with(move || Err(make()));
        let result = session.complete(&conversation()).await;
        assert_eq!(reason_code(&result), "transport");
    }
}

#[tokio::test]
async fn missing_text_is_malformed() {
    let (session, _) = session_with(|| Ok(AiResponse::default()));
    let result = session.complete(&conversation()).await;
    assert_eq!(reason_code(&result), "malformed_response");
}

#[tokio::test]
async fn unparseable_body_is_malformed_for_plain_calls() {
    let (session, _) = session_with(|| Err(AiError::ParseError("no choices".into())));
    let result = session.complete(&conversation()).await;
    match result.failure() {
        Some(FailureReason::MalformedResponse { detail }) => assert!(detail.contains("no choices")),
        other => panic!("expected malformed_response, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_log_is_still_sent() {
    let (session, seen) = session_with(|| Ok(text_reply("ok")));
    let result = session.complete(&MessageLog::new()).await;
    assert_eq!(result.text(), Some("ok"));
    assert!(seen.lock().unwrap()[0].messages.is_empty());
}

// -- structured --

#[tokio::test]
async fn structured_success_extracts_field() {
    let (session, _) =
        session_with(|| Ok(call_reply("extract_field", r#"{"content": "Hello summary"}"#)));
    let result = session
        .complete_structured(&MessageLog::new(), "Summarize: hello")
        .await;
    assert_eq!(result.field("content"), Some("Hello summary"));
    assert_eq!(
        result,
        CompletionResult::Structured([("content".to_string(), "Hello summary".to_string())].into())
    );
}

#[tokio::test]
async fn structured_request_forces_the_function() {
    let (session, seen) = session_with(|| Ok(call_reply("extract_field", r#"{"content": "x"}"#)));
    let log = conversation();
    session.complete_structured(&log, "Summarize: hello").await;

    let requests = seen.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.messages.len(), log.len() + 1);
    assert_eq!(&request.messages[..log.len()], log.messages());
    let last = request.messages.last().unwrap();
    assert_eq!(last.role, Role::User);
    assert_eq!(last.content, "Summarize: hello");

    assert_eq!(request.tools.len(), 1);
    assert_eq!(request.tools[0].name, "extract_field");
    assert_eq!(
        request.tools[0].parameters["required"],
        serde_json::json!(["content"])
    );
    assert_eq!(request.tool_choice.as_deref(), Some("extract_field"));
}

#[tokio::test]
async fn structured_input_is_never_committed() {
    let (session, _) = session_with(|| Ok(text_reply("free text instead")));
    let log = conversation();
    let before = log.clone();

    let result = session.complete_structured(&log, "Summarize: hello").await;
    assert_eq!(reason_code(&result), "schema_mismatch");
    assert_eq!(log, before);
}

#[tokio::test]
async fn wrong_function_name_is_schema_mismatch() {
    let (session, _) = session_with(|| Ok(call_reply("other_fn", r#"{"content": "x"}"#)));
    let result = session.complete_structured(&MessageLog::new(), "in").await;
    assert_eq!(reason_code(&result), "schema_mismatch");
}

#[tokio::test]
async fn invalid_arguments_are_schema_mismatch() {
    for args in ["{not json", "[\"content\"]", "\"content\"", "42"] {
        let (session, _) = session_with(move || Ok(call_reply("extract_field", args)));
        let result = session.complete_structured(&MessageLog::new(), "in").await;
        assert_eq!(reason_code(&result), "schema_mismatch", "arguments: {args}");
    }
}

#[tokio::test]
async fn non_string_field_is_schema_mismatch() {
    for args in [r#"{"content": 5}"#, r#"{"content": null}"#, r#"{"content": ["a"]}"#] {
        let (session, _) = session_with(move || Ok(call_reply("extract_field", args)));
        let result = session.complete_structured(&MessageLog::new(), "in").await;
        assert_eq!(reason_code(&result), "schema_mismatch", "arguments: {args}");
    }
}

#[tokio::test]
async fn absent_field_is_missing_field() {
    let (session, _) = session_with(|| Ok(call_reply("extract_field", r#"{"summary": "x"}"#)));
    let result = session.complete_structured(&MessageLog::new(), "in").await;
    assert_eq!(
        result,
        CompletionResult::Failure(FailureReason::MissingField {
            field: "content".into()
        })
    );
}

#[tokio::test]
async fn structured_transport_error_wins() {
    let (session, _) = session_with(|| Err(AiError::Timeout));
    let result = session.complete_structured(&MessageLog::new(), "in").await;
    assert_eq!(reason_code(&result), "transport");
}

#[tokio::test]
async fn structured_parse_error_is_schema_mismatch() {
    let (session, _) = session_with(|| Err(AiError::ParseError("expected value".into())));
    let result = session.complete_structured(&MessageLog::new(), "in").await;
    assert_eq!(reason_code(&result), "schema_mismatch");
}

#[tokio::test]
async fn explicit_field_overrides_default() {
    let (session, seen) = session_with(|| Ok(call_reply("extract_field", r#"{"title": "T"}"#)));
    let result = session
        .complete_structured_field(&MessageLog::new(), "Title this", "title")
        .await;
    assert_eq!(result.field("title"), Some("T"));
    assert_eq!(
        seen.lock().unwrap()[0].tools[0].parameters["required"],
        serde_json::json!(["title"])
    );
}

#[tokio::test]
async fn configured_function_and_field_are_used() {
    let structured = StructuredConfig {
        function_name: "generate_html_email".into(),
        field: "html".into(),
        ..StructuredConfig::default()
    };
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = StubClient {
        reply: Box::new(|| Ok(call_reply("generate_html_email", r#"{"html": "<p>Hi</p>"}"#))),
        seen: Arc::clone(&seen),
    };
    let session = CompletionSession::new(client, "gpt-test").with_structured(structured);
    assert_eq!(session.default_field(), "html");

    let result = session.complete_structured(&MessageLog::new(), "Write it").await;
    assert_eq!(result.field("html"), Some("<p>Hi</p>"));
    assert_eq!(
        seen.lock().unwrap()[0].tool_choice.as_deref(),
        Some("generate_html_email")
    );
}

// -- types --

#[test]
fn failure_codes_are_stable() {
    let cases = [
        (FailureReason::Transport { detail: "x".into() }, "transport"),
        (
            FailureReason::MalformedResponse { detail: "x".into() },
            "malformed_response",
        ),
        (
            FailureReason::SchemaMismatch { detail: "x".into() },
            "schema_mismatch",
        ),
        (
            FailureReason::MissingField {
                field: "content".into(),
            },
            "missing_field",
        ),
    ];
    for (reason, code) in cases {
        assert_eq!(reason.code(), code);
    }
}

#[test]
fn phases_display_snake_case() {
    assert_eq!(CompletionPhase::AwaitingRemote.to_string(), "awaiting_remote");
    assert_eq!(CompletionPhase::RequestBuilt.to_string(), "request_built");
}

#[test]
fn session_defaults() {
    let (session, _) = session_with(|| Ok(AiResponse::default()));
    assert_eq!(session.model(), "gpt-test");
    assert_eq!(session.default_field(), "content");
}

#[test]
fn from_config_requires_credential() {
    let mut config = ParleyConfig::default();
    config.provider.api_key_env = "PARLEY_SESSION_TEST_KEY_UNSET".into();
    assert!(matches!(
        CompletionSession::from_config(&config),
        Err(AiError::NotConfigured(_))
    ));
}
