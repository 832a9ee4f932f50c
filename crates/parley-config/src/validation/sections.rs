//! Per-section validators: provider, session, structured, logging.

use crate::schema::{ParleyConfig, SeedMode};

use super::helpers::{validate_identifier, validate_non_empty, validate_range};

/// Validate provider endpoint and timeout constraints.
pub(crate) fn validate_provider(errors: &mut Vec<String>, config: &ParleyConfig) {
    let provider = &config.provider;
    if !(provider.base_url.starts_with("https://") || provider.base_url.starts_with("http://")) {
        errors.push(format!(
            "provider.base_url = {:?} must start with http:// or https://",
            provider.base_url
        ));
    }
    validate_non_empty(errors, "provider.api_key_env", &provider.api_key_env);
    validate_range(
        errors,
        "provider.connect_timeout_secs",
        provider.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "provider.request_timeout_secs",
        provider.request_timeout_secs,
        1,
        600,
    );
}

/// Validate model selection and seeding.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_non_empty(errors, "session.model", &config.session.model);
    if config.session.seed == SeedMode::Custom {
        validate_non_empty(errors, "session.seed_text", &config.session.seed_text);
    }
}

/// Validate the structured-extraction function declaration.
pub(crate) fn validate_structured(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_identifier(
        errors,
        "structured.function_name",
        &config.structured.function_name,
    );
    validate_identifier(errors, "structured.field", &config.structured.field);
}

/// Validate logging directives.
pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &ParleyConfig) {
    for directive in &config.logging.directives {
        if directive.trim().is_empty() {
            errors.push("logging.directives must not contain empty entries".into());
        }
    }
}
