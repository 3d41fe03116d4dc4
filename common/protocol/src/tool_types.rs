//! Wire types for the tool protocol.

use serde::Deserialize;
use serde::Serialize;

use crate::content::ContentBlock;

/// Whether a tool can run concurrently with other tools in the same batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencySafety {
    Safe,
    Unsafe,
}

/// Result of [`Tool::validate`](crate) — kept here so `cocode-tools-api`
/// doesn't need its own copy for error formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid { errors: Vec<ValidationError> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub message: String,
    pub path: Option<String>,
}

impl ValidationError {
    pub fn with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

/// Result of [`Tool::check_permission`](crate).
#[derive(Debug, Clone, PartialEq)]
pub enum PermissionResult {
    Allowed,
    Denied { reason: String },
}

/// `{batchId, flush}` hint passed to write/edit tools. Within one tool batch, writes
/// share a `batch_id`; only the last call in the batch gets `flush: true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteBatchHint {
    pub batch_id: String,
    pub flush: bool,
}

/// A tool's result content plus opaque metadata for hooks/rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: crate::content::ToolResultContent,
    pub is_error: bool,
    /// Modifiers a hook applied to this result before it was persisted
    ///. Empty unless a hook mutated it.
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: crate::content::ToolResultContent::Text(content.into()),
            is_error: false,
            modifiers: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: crate::content::ToolResultContent::Text(message.into()),
            is_error: true,
            modifiers: Vec::new(),
        }
    }

    pub fn blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            content: crate::content::ToolResultContent::Blocks(blocks),
            is_error: false,
            modifiers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_output_error_sets_flag() {
        let out = ToolOutput::error("boom");
        assert!(out.is_error);
    }
}
