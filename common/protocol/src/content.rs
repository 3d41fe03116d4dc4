//! Content blocks shared by assistant messages and tool results.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// One block of a message's content, in provider-preserved order.
///
/// The agent loop must not reorder or merge blocks of different kinds —
/// concurrent text and thinking blocks stay distinct entries in this vec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Thinking { text: String },
    Image { source: ImageSource },
    ToolCall(ToolCall),
    ToolResult(ToolResultRef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSource {
    /// Base64-encoded image bytes.
    pub data: String,
    pub media_type: String,
}

/// A tool invocation requested by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Pointer from an embedded tool-result content block back to the call it
/// answers. The canonical tool result lives in a `ToolResultMessage` entry;
/// this variant exists so `ContentBlock` can round-trip provider payloads
/// that inline results into a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResultRef {
    pub tool_call_id: String,
    pub content: ToolResultContent,
    #[serde(default)]
    pub is_error: bool,
}

/// What a tool produced: either plain text or a structured JSON value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolResultContent {
    Text(String),
    Structured(Value),
    Blocks(Vec<ContentBlock>),
}

impl ToolResultContent {
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(t) => t.clone(),
            Self::Structured(v) => v.to_string(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter_map(|b| match b {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_result_content_as_text_joins_blocks() {
        let content = ToolResultContent::Blocks(vec![
            ContentBlock::Text { text: "a".into() },
            ContentBlock::Thinking { text: "ignored".into() },
            ContentBlock::Text { text: "b".into() },
        ]);
        assert_eq!(content.as_text(), "a\nb");
    }

    #[test]
    fn structured_as_text_stringifies_json() {
        let content = ToolResultContent::Structured(serde_json::json!({"ok": true}));
        assert_eq!(content.as_text(), "{\"ok\":true}");
    }
}
