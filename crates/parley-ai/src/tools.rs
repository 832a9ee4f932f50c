//! Function/tool declarations sent with a completion request.
//!
//! Structured extraction declares exactly one function with one required
//! string parameter and forces the model to call it.

use parley_config::StructuredConfig;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the argument object.
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// A function taking a single required string parameter `field`.
    pub fn single_field(
        name: impl Into<String>,
        description: impl Into<String>,
        field: &str,
        field_description: &str,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    field: {
                        "type": "string",
                        "description": field_description,
                    }
                },
                "required": [field],
            }),
        }
    }

    /// The structured-extraction function described by `[structured]`,
    /// declared over `field`.
    pub fn from_settings(config: &StructuredConfig, field: &str) -> Self {
        Self::single_field(
            &config.function_name,
            &config.function_description,
            field,
            &config.field_description,
        )
    }
}

/// Convert a tool definition to the chat-completions `tools` entry.
pub fn to_openai_tool(tool: &ToolDefinition) -> serde_json::Value {
    serde_json::json!({
        "type": "function",
        "function": to_openai_function(tool),
    })
}

/// Convert a tool definition to the legacy `functions` entry.
pub fn to_openai_function(tool: &ToolDefinition) -> serde_json::Value {
    serde_json::json!({
        "name": tool.name,
        "description": tool.description,
        "parameters": tool.parameters,
    })
}
