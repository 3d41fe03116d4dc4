//! The session entry union — the unit of the append-only log.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::content::ContentBlock;
use crate::content::ToolResultContent;
use crate::usage::TokenUsage;

/// One immutable record in a session's log.
///
/// `parent_id` is `None` only for the header; every other entry's
/// `parent_id` must name an entry already present earlier in the same file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEntry {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EntryPayload,
}

impl SessionEntry {
    /// Construct an entry with a fresh id and the current timestamp; used
    /// by `append` before `parent_id` is filled in with the current leaf.
    pub fn new(payload: EntryPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: None,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Whether this entry counts toward the "effective LLM context" view
    /// (i.e. is not hook-private `Custom` state).
    pub fn is_llm_visible(&self) -> bool {
        !matches!(self.payload, EntryPayload::Custom(_) | EntryPayload::Header(_))
    }

    pub fn type_tag(&self) -> &'static str {
        self.payload.type_tag()
    }
}

/// Type-specific payload of a [`SessionEntry`].
///
/// Readers must ignore unknown `type` values — that tolerance lives in
/// `cocode-session`'s line-by-line reader, which falls back to raw JSON
/// before attempting this strict deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryPayload {
    Header(SessionHeader),
    User(UserMessage),
    Assistant(AssistantMessage),
    ToolResult(ToolResultMessage),
    BashExecution(BashExecutionMessage),
    CustomMessage(CustomMessageEntry),
    Custom(CustomEntry),
    Compaction(CompactionEntry),
    BranchSummary(BranchSummaryEntry),
    ThinkingLevelChange(ThinkingLevelChangeEntry),
    ModelChange(ModelChangeEntry),
    Label(LabelEntry),
}

impl EntryPayload {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::User(_) => "user",
            Self::Assistant(_) => "assistant",
            Self::ToolResult(_) => "tool_result",
            Self::BashExecution(_) => "bash_execution",
            Self::CustomMessage(_) => "custom_message",
            Self::Custom(_) => "custom",
            Self::Compaction(_) => "compaction",
            Self::BranchSummary(_) => "branch_summary",
            Self::ThinkingLevelChange(_) => "thinking_level_change",
            Self::ModelChange(_) => "model_change",
            Self::Label(_) => "label",
        }
    }

    /// True for the entry kinds that make up a "turn boundary" the compactor
    /// is allowed to cut at: user, assistant, bash execution, custom
    /// message, branch summary, compaction summary. Never `tool_result`.
    pub fn is_valid_cut_point(&self) -> bool {
        matches!(
            self,
            Self::User(_)
                | Self::Assistant(_)
                | Self::BashExecution(_)
                | Self::CustomMessage(_)
                | Self::BranchSummary(_)
                | Self::Compaction(_)
        )
    }
}

/// First entry of a session file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionHeader {
    pub session_id: String,
    pub cwd: String,
    pub provider: String,
    pub model_id: String,
    #[serde(default)]
    pub thinking_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branched_from: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserMessage {
    pub content: Vec<ContentBlock>,
}

impl UserMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    #[default]
    Stop,
    Length,
    ToolUse,
    Aborted,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantMessage {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: TokenUsage,
    pub stop_reason: StopReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AssistantMessage {
    /// Aborted/error messages must report zero usage.
    pub fn validate_usage_invariant(&self) -> bool {
        if matches!(self.stop_reason, StopReason::Aborted | StopReason::Error) {
            self.usage.is_zero()
        } else {
            true
        }
    }

    pub fn tool_calls(&self) -> Vec<&crate::content::ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolCall(tc) => Some(tc),
                _ => None,
            })
            .collect()
    }

    /// Whether this assembled message has no observable content — used by
    /// the loop to decide whether an aborted partial message is discarded
    ///.
    pub fn is_content_empty(&self) -> bool {
        self.content.iter().all(|b| match b {
            ContentBlock::Text { text } => text.is_empty(),
            ContentBlock::Thinking { text } => text.is_empty(),
            _ => false,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResultMessage {
    pub tool_call_id: String,
    pub content: ToolResultContent,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BashExecutionMessage {
    pub command: String,
    pub output: String,
    #[serde(default)]
    pub exit_code: Option<i32>,
}

/// Hook-injected message content: either plain text or content blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CustomContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// Hook-injected message that DOES enter LLM context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomMessageEntry {
    pub custom_type: String,
    pub content: CustomContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Hook-private durable state, NOT in LLM context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomEntry {
    pub custom_type: String,
    pub data: Value,
}

/// Marks a compaction boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompactionEntry {
    pub summary: String,
    pub first_kept_entry_id: Uuid,
    pub tokens_before: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Summary of a sibling branch left behind during navigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchSummaryEntry {
    pub summary: String,
    pub from_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThinkingLevelChangeEntry {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelChangeEntry {
    pub provider: String,
    pub model_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelEntry {
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_usage_invariant_holds_for_aborted() {
        let msg = AssistantMessage {
            content: vec![],
            usage: TokenUsage::zero(),
            stop_reason: StopReason::Aborted,
            error_message: None,
        };
        assert!(msg.validate_usage_invariant());
    }

    #[test]
    fn assistant_usage_invariant_rejects_nonzero_on_error() {
        let msg = AssistantMessage {
            content: vec![],
            usage: TokenUsage::new(5, 5),
            stop_reason: StopReason::Error,
            error_message: Some("boom".into()),
        };
        assert!(!msg.validate_usage_invariant());
    }

    #[test]
    fn tool_result_is_never_a_valid_cut_point() {
        let payload = EntryPayload::ToolResult(ToolResultMessage {
            tool_call_id: "call_1".into(),
            content: ToolResultContent::Text("ok".into()),
            is_error: false,
            details: None,
        });
        assert!(!payload.is_valid_cut_point());
    }

    #[test]
    fn user_and_assistant_are_valid_cut_points() {
        assert!(EntryPayload::User(UserMessage::text("hi")).is_valid_cut_point());
        let assistant = AssistantMessage {
            content: vec![],
            usage: TokenUsage::zero(),
            stop_reason: StopReason::Stop,
            error_message: None,
        };
        assert!(EntryPayload::Assistant(assistant).is_valid_cut_point());
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = SessionEntry::new(EntryPayload::User(UserMessage::text("hello")));
        let json = serde_json::to_string(&entry).unwrap();
        let back: SessionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn custom_entry_is_not_llm_visible() {
        let entry = SessionEntry::new(EntryPayload::Custom(CustomEntry {
            custom_type: "memory".into(),
            data: serde_json::json!({"k": "v"}),
        }));
        assert!(!entry.is_llm_visible());
    }
}
