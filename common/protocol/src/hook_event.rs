//! The typed hook event vocabulary.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Discriminant for [`HookEventType`], used as a registration key so a hook
/// factory can call `api.on(HookEventKind::ToolCall, handler)` without
/// constructing a dummy payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEventKind {
    SessionStart,
    BeforeAgentStart,
    AgentStart,
    AgentEnd,
    TurnStart,
    TurnEnd,
    Context,
    ToolCall,
    ToolResult,
    MessageStart,
    MessageUpdate,
    MessageEnd,
    SessionBeforeCompact,
    SessionCompact,
    SessionBeforeBranch,
    SessionBeforeSwitch,
    SessionBeforeNew,
    SessionBeforeTree,
    SessionShutdown,
}

/// One dispatched hook event, carrying whatever payload that event kind
/// defines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HookEvent {
    SessionStart,
    /// After user submit, pre-PREP. May return `{message}` to inject.
    BeforeAgentStart { user_text: String },
    AgentStart,
    AgentEnd,
    TurnStart { turn_id: String },
    TurnEnd { turn_id: String },
    /// Just before `convertToLlm`. May return `{messages}` to replace the
    /// effective messages non-destructively (session unchanged).
    Context { message_count: usize },
    /// Before tool exec. May return `{block, reason}`.
    ToolCall { call_id: String, tool_name: String, input: Value },
    /// After tool exec. May return `{content, details, is_error}` to replace.
    ToolResult {
        call_id: String,
        tool_name: String,
        content: Value,
        is_error: bool,
    },
    MessageStart { turn_id: String },
    MessageUpdate { turn_id: String },
    MessageEnd { turn_id: String },
    /// Before compaction runs. May return `{cancel}` or `{compaction}`.
    SessionBeforeCompact { tokens_before: i64 },
    SessionCompact { tokens_after: i64 },
    SessionBeforeBranch { from_id: String },
    SessionBeforeSwitch { to_leaf_id: String },
    SessionBeforeNew,
    SessionBeforeTree,
    SessionShutdown { reason: String },
}

impl HookEvent {
    pub fn kind(&self) -> HookEventKind {
        match self {
            Self::SessionStart => HookEventKind::SessionStart,
            Self::BeforeAgentStart { .. } => HookEventKind::BeforeAgentStart,
            Self::AgentStart => HookEventKind::AgentStart,
            Self::AgentEnd => HookEventKind::AgentEnd,
            Self::TurnStart { .. } => HookEventKind::TurnStart,
            Self::TurnEnd { .. } => HookEventKind::TurnEnd,
            Self::Context { .. } => HookEventKind::Context,
            Self::ToolCall { .. } => HookEventKind::ToolCall,
            Self::ToolResult { .. } => HookEventKind::ToolResult,
            Self::MessageStart { .. } => HookEventKind::MessageStart,
            Self::MessageUpdate { .. } => HookEventKind::MessageUpdate,
            Self::MessageEnd { .. } => HookEventKind::MessageEnd,
            Self::SessionBeforeCompact { .. } => HookEventKind::SessionBeforeCompact,
            Self::SessionCompact { .. } => HookEventKind::SessionCompact,
            Self::SessionBeforeBranch { .. } => HookEventKind::SessionBeforeBranch,
            Self::SessionBeforeSwitch { .. } => HookEventKind::SessionBeforeSwitch,
            Self::SessionBeforeNew => HookEventKind::SessionBeforeNew,
            Self::SessionBeforeTree => HookEventKind::SessionBeforeTree,
            Self::SessionShutdown { .. } => HookEventKind::SessionShutdown,
        }
    }

    /// Whether an exception thrown while handling this event kind should be
    /// interpreted as a veto.
    pub fn fails_closed(&self) -> bool {
        matches!(self, Self::ToolCall { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_call_fails_closed_but_others_do_not() {
        let tool_call = HookEvent::ToolCall {
            call_id: "c1".into(),
            tool_name: "bash".into(),
            input: Value::Null,
        };
        assert!(tool_call.fails_closed());
        assert!(!HookEvent::AgentStart.fails_closed());
    }

    #[test]
    fn kind_matches_variant() {
        let event = HookEvent::TurnStart { turn_id: "t1".into() };
        assert_eq!(event.kind(), HookEventKind::TurnStart);
    }
}
