//! Remote provider configuration types.

use serde::{Deserialize, Serialize};

/// How a forced structured-output call is expressed on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum FunctionStyle {
    /// `tools` + `tool_choice` (current chat-completions API).
    #[default]
    Tools,
    /// `functions` + `function_call` (legacy API).
    Functions,
}

/// Chat-completion endpoint settings.
///
/// The credential itself is never stored here, only the name of the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key_env: String,
    /// Connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub request_timeout_secs: u32,
    pub function_style: FunctionStyle,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
            function_style: FunctionStyle::Tools,
        }
    }
}
