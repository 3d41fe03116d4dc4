//! Streaming event vocabulary a provider adapter yields while generating:
//! `text_start|text_delta|text_end`,
//! `thinking_start|thinking_delta|thinking_end`,
//! `toolcall_start|toolcall_delta|toolcall_end`, then `done|error`. The loop
//! assembles these into a partial `AssistantMessage` block-by-block without
//! merging concurrent text/thinking blocks.

use cocode_protocol::StopReason;
use cocode_protocol::TokenUsage;
use cocode_protocol::ToolCall;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    TextStart { index: i64 },
    TextDelta { index: i64, delta: String },
    TextEnd { index: i64, text: String },
    ThinkingStart { index: i64 },
    ThinkingDelta { index: i64, delta: String },
    ThinkingEnd { index: i64, text: String },
    ToolCallStart { index: i64, id: String, name: String },
    ToolCallDelta { index: i64, delta: String },
    ToolCallEnd { index: i64, tool_call: ToolCall },
    Done { stop_reason: StopReason, usage: TokenUsage },
    Error { message: String, retryable: bool },
}

impl StreamEvent {
    pub fn text_delta(index: i64, delta: impl Into<String>) -> Self {
        Self::TextDelta { index, delta: delta.into() }
    }

    pub fn tool_call_start(index: i64, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ToolCallStart { index, id: id.into(), name: name.into() }
    }

    pub fn tool_call_end(index: i64, tool_call: ToolCall) -> Self {
        Self::ToolCallEnd { index, tool_call }
    }

    pub fn done(stop_reason: StopReason, usage: TokenUsage) -> Self {
        Self::Done { stop_reason, usage }
    }

    /// Whether this event carries an incremental fragment (as opposed to a
    /// start/end boundary or a terminal event).
    pub fn is_delta(&self) -> bool {
        matches!(self, Self::TextDelta { .. } | Self::ThinkingDelta { .. } | Self::ToolCallDelta { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }

    pub fn as_text_delta(&self) -> Option<&str> {
        match self {
            Self::TextDelta { delta, .. } => Some(delta.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "stream.test.rs"]
mod tests;
