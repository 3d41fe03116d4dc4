use cocode_protocol::AssistantMessage;
use cocode_protocol::BashExecutionMessage;
use cocode_protocol::CompactionEntry;
use cocode_protocol::StopReason;
use cocode_protocol::TokenUsage;
use cocode_protocol::UserMessage;

use super::*;

fn user(text: &str) -> SessionEntry {
    SessionEntry::new(EntryPayload::User(UserMessage::text(text)))
}

#[test]
fn no_compaction_keeps_the_whole_branch() {
    let branch = vec![user("a"), user("b")];
    assert_eq!(build_session_context(&branch), branch);
}

#[test]
fn compaction_drops_entries_before_first_kept() {
    let a = user("a");
    let b = user("b");
    let kept = user("kept");
    let compaction = SessionEntry::new(EntryPayload::Compaction(CompactionEntry {
        summary: "summary of a, b".into(),
        first_kept_entry_id: kept.id,
        tokens_before: 1_000,
        details: None,
    }));
    let branch = vec![a, b, compaction.clone(), kept.clone()];

    let view = build_session_context(&branch);
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].id, compaction.id);
    assert_eq!(view[1].id, kept.id);
}

#[test]
fn convert_to_llm_skips_header_and_custom() {
    let header = SessionEntry::new(EntryPayload::Header(cocode_protocol::SessionHeader {
        session_id: "s".into(),
        cwd: "/".into(),
        provider: "anthropic".into(),
        model_id: "claude".into(),
        thinking_level: None,
        branched_from: None,
    }));
    let custom = SessionEntry::new(EntryPayload::Custom(cocode_protocol::CustomEntry {
        custom_type: "memory".into(),
        data: serde_json::json!({}),
    }));
    let visible = user("hi");

    let messages = convert_to_llm(&[header, custom, visible]);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, LlmRole::User);
}

#[test]
fn convert_to_llm_folds_bash_execution_into_a_user_message() {
    let entry = SessionEntry::new(EntryPayload::BashExecution(BashExecutionMessage {
        command: "ls".into(),
        output: "a.txt".into(),
        exit_code: Some(0),
    }));
    let messages = convert_to_llm(&[entry]);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, LlmRole::User);
    let ContentBlock::Text { text } = &messages[0].content[0] else {
        panic!("expected text block");
    };
    assert!(text.contains("ls"));
    assert!(text.contains("a.txt"));
}

#[test]
fn convert_to_llm_is_idempotent() {
    let assistant = SessionEntry::new(EntryPayload::Assistant(AssistantMessage {
        content: vec![ContentBlock::Text { text: "hi".into() }],
        usage: TokenUsage::zero(),
        stop_reason: StopReason::Stop,
        error_message: None,
    }));
    let entries = vec![user("a"), assistant];
    assert_eq!(convert_to_llm(&entries), convert_to_llm(&entries));
}
