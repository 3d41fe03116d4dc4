//! Provider-agnostic generation response.
//!
//! Reuses `cocode_protocol::StopReason`/`TokenUsage`/`ContentBlock` instead
//! of a parallel `FinishReason`/`TokenUsage` pair, so a response assembled
//! here is already shaped the way an `AssistantMessage` entry wants it.

use cocode_protocol::ContentBlock;
use cocode_protocol::StopReason;
use cocode_protocol::TokenUsage;
use cocode_protocol::ToolCall;

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
    pub model: String,
}

impl GenerateResponse {
    pub fn new(id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: vec![],
            stop_reason: StopReason::Stop,
            usage: TokenUsage::zero(),
            model: model.into(),
        }
    }

    pub fn with_content(mut self, content: Vec<ContentBlock>) -> Self {
        self.content = content;
        self
    }

    pub fn with_stop_reason(mut self, reason: StopReason) -> Self {
        self.stop_reason = reason;
        self
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn thinking(&self) -> Option<&str> {
        self.content.iter().find_map(|b| match b {
            ContentBlock::Thinking { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content.iter().any(|b| matches!(b, ContentBlock::ToolCall(_)))
    }

    pub fn has_thinking(&self) -> bool {
        self.content.iter().any(|b| matches!(b, ContentBlock::Thinking { .. }))
    }

    pub fn stopped_for_tool_calls(&self) -> bool {
        self.stop_reason == StopReason::ToolUse
    }
}

#[cfg(test)]
#[path = "response.test.rs"]
mod tests;
