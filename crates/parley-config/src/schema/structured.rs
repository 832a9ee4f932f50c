//! Structured-extraction configuration types.

use serde::{Deserialize, Serialize};

/// The single function declared for structured extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredConfig {
    pub function_name: String,
    pub function_description: String,
    /// Default parameter name when the caller does not name one.
    pub field: String,
    pub field_description: String,
}

impl Default for StructuredConfig {
    fn default() -> Self {
        Self {
            function_name: "extract_field".into(),
            function_description: "Return the requested output in a single named field".into(),
            field: "content".into(),
            field_description: "The requested output".into(),
        }
    }
}
