//! Tool definitions offered to a provider for a generate/stream call.
//!
//! Tool *calls* and *results* are not duplicated here — this crate reuses
//! `cocode_protocol::ToolCall` and `cocode_protocol::ToolResultContent`
//! directly, since this is an internal facade rather than a published SDK
//! with its own wire-compat surface to protect.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Definition of a tool that can be called by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
    /// Custom tool format (OpenAI-only); non-OpenAI providers ignore it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_format: Option<Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters,
            custom_format: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn full(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters,
            custom_format: None,
        }
    }

    pub fn custom(name: impl Into<String>, description: impl Into<String>, custom_format: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters: Value::Null,
            custom_format: Some(custom_format),
        }
    }
}

/// How the model should choose which tool to call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    #[default]
    Auto,
    Required,
    None,
    Tool {
        name: String,
    },
}

#[cfg(test)]
#[path = "tools.test.rs"]
mod tests;
