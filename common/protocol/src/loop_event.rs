//! Events emitted by the agent loop.
//!
//! These events provide a complete view of what the agent is doing,
//! enabling UI updates, logging, the control-plane RPC surface, and tests
//! that assert on event ordering.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::content::ContentBlock;
use crate::entry::AssistantMessage;
use crate::entry::StopReason;
use crate::usage::TokenUsage;

/// Events emitted during loop execution, in the order they occur.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoopEvent {
    // ===== Outer lifecycle (one per `prompt()` call) =====
    AgentStart,
    AgentEnd,

    // ===== Turn lifecycle =====
    TurnStart { turn_id: String, turn_number: i32 },
    TurnEnd { turn_id: String },

    // ===== Streaming content =====
    MessageStart { turn_id: String },
    MessageUpdate {
        turn_id: String,
        /// The partial assistant message assembled so far.
        partial: PartialAssistantMessage,
    },
    MessageEnd { turn_id: String, message: AssistantMessage },

    // ===== Tool dispatch =====
    ToolCall { turn_id: String, call_id: String, name: String, input: Value },
    ToolExecutionStart { call_id: String, name: String },
    ToolExecutionUpdate { call_id: String, partial: Value },
    ToolExecutionEnd { call_id: String, is_error: bool },
    ToolResult { turn_id: String, call_id: String, is_error: bool },

    // ===== Retry =====
    AutoRetryStart { attempt: i32, max_attempts: i32 },
    AutoRetryEnd { attempt: i32, succeeded: bool },

    // ===== Compaction =====
    CompactionStarted,
    CompactionCompleted { summary_tokens: i64, tokens_before: i64 },
    CompactionCancelled,
    CompactionFailed { reason: String },

    // ===== Model fallback =====
    ModelFallbackStarted { from: String, to: String, reason: String },
}

/// A partial assistant message assembled from streamed events, emitted
/// alongside each raw provider event so fine-grained renderers can react
/// without re-deriving state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialAssistantMessage {
    pub content: Vec<ContentBlock>,
    pub usage: TokenUsage,
    pub stop_reason: Option<StopReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_event_round_trips_through_json() {
        let event = LoopEvent::TurnStart {
            turn_id: "t1".into(),
            turn_number: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"turn_start\""));
        let back: LoopEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, LoopEvent::TurnStart { turn_number: 1, .. }));
    }
}
