//! Shared validation helpers used by the section validators.

use std::sync::LazyLock;

use regex::Regex;

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is empty or whitespace.
pub(crate) fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

/// Function and parameter names accepted by the chat-completions API.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Push an error unless `value` is a legal function/parameter identifier
/// for the chat-completions API (1-64 chars of `[A-Za-z0-9_-]`).
pub(crate) fn validate_identifier(errors: &mut Vec<String>, name: &str, value: &str) {
    if !IDENTIFIER_RE.is_match(value) {
        errors.push(format!(
            "{name} = {value:?} must match [A-Za-z0-9_-] and be 1-64 characters"
        ));
    }
}
