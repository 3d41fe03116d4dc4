use cocode_error::ErrorExt;
use cocode_protocol::ContentBlock;
use cocode_protocol::StopReason;
use cocode_protocol::TokenUsage;
use cocode_protocol::ToolCall;
use cocode_protocol::UserMessage;
use tempfile::TempDir;

use super::*;

fn header() -> SessionHeader {
    SessionHeader {
        session_id: "s1".into(),
        cwd: "/work".into(),
        provider: "anthropic".into(),
        model_id: "claude".into(),
        thinking_level: None,
        branched_from: None,
    }
}

#[test]
fn create_seeds_a_header_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    let store = SessionStore::open_or_create(path, header()).unwrap();
    assert_eq!(store.tree().len(), 1);
    assert_eq!(store.branch()[0].type_tag(), "header");
}

#[test]
fn append_advances_leaf_and_links_parent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();
    let header_id = store.current_leaf();
    let entry = store
        .append(EntryPayload::User(UserMessage::text("hi")))
        .unwrap();
    assert_eq!(entry.parent_id, Some(header_id));
    assert_eq!(store.current_leaf(), entry.id);
}

#[test]
fn reopening_replays_every_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    {
        let mut store = SessionStore::open_or_create(path.clone(), header()).unwrap();
        store.append(EntryPayload::User(UserMessage::text("hi"))).unwrap();
    }
    let reopened = SessionStore::open_or_create(path, header()).unwrap();
    assert_eq!(reopened.tree().len(), 2);
}

#[test]
fn append_after_shutdown_is_a_state_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();
    store.shutdown();
    let err = store.append(EntryPayload::User(UserMessage::text("hi"))).unwrap_err();
    assert_eq!(err.status_code(), cocode_error::StatusCode::InvalidRequest);
}

#[test]
fn set_leaf_rejects_unknown_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();
    assert!(store.set_leaf(Uuid::new_v4()).is_err());
}

#[test]
fn branching_after_set_leaf_forks_the_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();
    let header_id = store.current_leaf();
    let a = store.append(EntryPayload::User(UserMessage::text("a"))).unwrap();
    store.set_leaf(header_id).unwrap();
    let b = store.append(EntryPayload::User(UserMessage::text("b"))).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(store.tree().children_of(header_id).len(), 2);
}

fn branched_header() -> SessionHeader {
    SessionHeader {
        session_id: "s2".into(),
        cwd: "/work".into(),
        provider: "anthropic".into(),
        model_id: "claude".into(),
        thinking_level: None,
        branched_from: Some("s1".into()),
    }
}

#[test]
fn fork_replays_the_branch_into_a_new_file_and_sets_branched_from() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s1.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();
    store.append(EntryPayload::User(UserMessage::text("a"))).unwrap();
    let cut = store.append(EntryPayload::User(UserMessage::text("b"))).unwrap();
    store.append(EntryPayload::User(UserMessage::text("c"))).unwrap();

    let new_path = dir.path().join("s2.jsonl");
    let forked = store.fork(cut.id, new_path, branched_header()).unwrap();

    assert_eq!(forked.current_leaf(), cut.id);
    let branch = forked.branch();
    assert_eq!(branch.len(), 3);
    let EntryPayload::Header(forked_header) = &branch[0].payload else { panic!("expected header") };
    assert_eq!(forked_header.branched_from.as_deref(), Some("s1"));
    assert!(branch.iter().any(|e| matches!(&e.payload, EntryPayload::User(u) if u.content == UserMessage::text("b").content)));
}

#[test]
fn fork_leaves_a_branch_summary_on_the_origin_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s1.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();
    let cut = store.append(EntryPayload::User(UserMessage::text("a"))).unwrap();

    let new_path = dir.path().join("s2.jsonl");
    store.fork(cut.id, new_path, branched_header()).unwrap();

    let summary = store.branch().into_iter().find_map(|e| match e.payload {
        EntryPayload::BranchSummary(s) => Some(s),
        _ => None,
    });
    assert_eq!(summary.unwrap().from_id, cut.id);
}

#[test]
fn fork_from_unknown_id_is_an_entry_not_found_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s1.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();

    let new_path = dir.path().join("s2.jsonl");
    assert!(store.fork(Uuid::new_v4(), new_path, branched_header()).is_err());
}

fn assistant_with_tool_call(call_id: &str) -> EntryPayload {
    EntryPayload::Assistant(cocode_protocol::AssistantMessage {
        content: vec![ContentBlock::ToolCall(ToolCall::new(
            call_id,
            "bash",
            serde_json::json!({"command": "ls"}),
        ))],
        usage: TokenUsage::new(10, 10),
        stop_reason: StopReason::ToolUse,
        error_message: None,
    })
}

#[test]
fn rewrite_tool_call_args_patches_and_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    let mut store = SessionStore::open_or_create(path.clone(), header()).unwrap();
    let entry = store.append(assistant_with_tool_call("call_1")).unwrap();

    store
        .rewrite_assistant_tool_call_args(entry.id, "call_1", serde_json::json!({"command": "pwd"}))
        .unwrap();

    let reopened = SessionStore::open_or_create(path, header()).unwrap();
    let rewritten = reopened.tree().get(entry.id).unwrap();
    let EntryPayload::Assistant(msg) = &rewritten.payload else {
        panic!("expected assistant message");
    };
    let ContentBlock::ToolCall(tool_call) = &msg.content[0] else {
        panic!("expected tool call block");
    };
    assert_eq!(tool_call.arguments, serde_json::json!({"command": "pwd"}));
}

#[test]
fn rewrite_unknown_call_id_is_a_state_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    let mut store = SessionStore::open_or_create(path, header()).unwrap();
    let entry = store.append(assistant_with_tool_call("call_1")).unwrap();
    let err = store
        .rewrite_assistant_tool_call_args(entry.id, "nonexistent", serde_json::json!({}))
        .unwrap_err();
    assert_eq!(err.status_code(), cocode_error::StatusCode::InvalidRequest);
}
