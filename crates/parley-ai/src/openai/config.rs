//! OpenAI-compatible client configuration.

use std::fmt;
use std::time::Duration;

use parley_config::{FunctionStyle, ProviderConfig};

use crate::AiError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions client configuration.
///
/// The credential lives here and nowhere else; `Debug` redacts it.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub function_style: FunctionStyle,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("function_style", &self.function_style)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            function_style: FunctionStyle::Tools,
        }
    }

    /// Build from `[provider]`, reading the credential from the
    /// environment variable it names.
    pub fn from_settings(settings: &ProviderConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AiError::NotConfigured(format!(
                    "environment variable {} is not set",
                    settings.api_key_env
                ))
            })?;
        Ok(Self::with_settings(api_key, settings))
    }

    /// Build from `[provider]` with an explicitly supplied credential.
    pub fn with_settings(api_key: impl Into<String>, settings: &ProviderConfig) -> Self {
        Self::new(api_key)
            .with_base_url(&settings.base_url)
            .with_timeouts(
                Duration::from_secs(settings.connect_timeout_secs.into()),
                Duration::from_secs(settings.request_timeout_secs.into()),
            )
            .with_function_style(settings.function_style)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    pub fn with_function_style(mut self, style: FunctionStyle) -> Self {
        self.function_style = style;
        self
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = OpenAiConfig::new("sk-secret-value");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sk-secret-value"));
    }

    #[test]
    fn defaults_target_openai() {
        let config = OpenAiConfig::new("k");
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.function_style, FunctionStyle::Tools);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = OpenAiConfig::new("k").with_base_url("http://localhost:8080/v1/");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn with_settings_copies_provider_section() {
        let settings = ProviderConfig {
            base_url: "http://127.0.0.1:11434/v1".into(),
            connect_timeout_secs: 3,
            request_timeout_secs: 30,
            function_style: FunctionStyle::Functions,
            ..ProviderConfig::default()
        };
        let config = OpenAiConfig::with_settings("k", &settings);
        assert_eq!(config.base_url, "http://127.0.0.1:11434/v1");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.function_style, FunctionStyle::Functions);
    }

    #[test]
    fn from_settings_requires_env_var() {
        let settings = ProviderConfig {
            api_key_env: "PARLEY_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..ProviderConfig::default()
        };
        let err = OpenAiConfig::from_settings(&settings).unwrap_err();
        assert!(matches!(err, AiError::NotConfigured(_)));
        assert!(err.to_string().contains("PARLEY_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
