//! AiClient trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{AiClient, AiError, AiResponse, CompletionRequest};

use super::client::{classify_send_error, classify_status, parse_response, OpenAiClient};

#[async_trait]
impl AiClient for OpenAiClient {
    async fn send_message(&self, request: &CompletionRequest) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(request);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            forced = request.tool_choice.as_deref().unwrap_or("-"),
            "chat completion request"
        );

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = classify_status(status, &text);
            warn!(%status, "chat completion rejected");
            return Err(err);
        }

        let text = response.text().await.map_err(classify_send_error)?;
        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| AiError::ParseError(e.to_string()))?;

        parse_response(&json)
    }
}
