use cocode_protocol::AssistantMessage;
use cocode_protocol::ContentBlock;
use cocode_protocol::ModelChangeEntry;
use cocode_protocol::StopReason;
use cocode_protocol::TokenUsage;
use cocode_protocol::ToolCall;
use cocode_protocol::ToolResultContent;
use cocode_protocol::ToolResultMessage;
use cocode_protocol::UserMessage;

use super::*;

fn user(text: &str) -> SessionEntry {
    SessionEntry::new(EntryPayload::User(UserMessage::text(text)))
}

fn assistant_with_tool_call() -> SessionEntry {
    SessionEntry::new(EntryPayload::Assistant(AssistantMessage {
        content: vec![ContentBlock::ToolCall(ToolCall::new("c1", "bash", serde_json::json!({})))],
        usage: TokenUsage::new(5, 5),
        stop_reason: StopReason::ToolUse,
        error_message: None,
    }))
}

fn tool_result() -> SessionEntry {
    SessionEntry::new(EntryPayload::ToolResult(ToolResultMessage {
        tool_call_id: "c1".into(),
        content: ToolResultContent::Text("ok".into()),
        is_error: false,
        details: None,
    }))
}

#[test]
fn small_branch_keeps_everything() {
    let branch = vec![user("hi")];
    assert_eq!(find_cut_index(&branch, 1_000_000, 1_200), 0);
}

#[test]
fn never_cuts_at_a_tool_result() {
    let branch = vec![
        user(&"x".repeat(4_000)),
        assistant_with_tool_call(),
        tool_result(),
        user("final"),
    ];
    let idx = find_cut_index(&branch, 1, 1_200);
    assert!(branch[idx].payload.is_valid_cut_point());
    assert_ne!(branch[idx].type_tag(), "tool_result");
}

#[test]
fn control_entries_stay_attached_to_the_turn_they_precede() {
    let model_change = SessionEntry::new(EntryPayload::ModelChange(ModelChangeEntry {
        provider: "anthropic".into(),
        model_id: "claude".into(),
    }));
    let branch = vec![user(&"x".repeat(4_000)), model_change.clone(), user("after")];
    let idx = find_cut_index(&branch, 0, 1_200);
    assert_eq!(branch[idx].id, model_change.id);
}
