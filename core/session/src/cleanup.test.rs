use tempfile::TempDir;

use super::*;
use crate::SessionStore;
use cocode_protocol::EntryPayload;
use cocode_protocol::SessionHeader;
use cocode_protocol::UserMessage;

fn header() -> SessionHeader {
    SessionHeader {
        session_id: "s".into(),
        cwd: "/work".into(),
        provider: "anthropic".into(),
        model_id: "claude".into(),
        thinking_level: None,
        branched_from: None,
    }
}

#[test]
fn removes_header_only_files_but_keeps_the_rest() {
    let dir = TempDir::new().unwrap();

    let empty_path = dir.path().join("empty.jsonl");
    SessionStore::open_or_create(empty_path.clone(), header()).unwrap();

    let used_path = dir.path().join("used.jsonl");
    let mut used = SessionStore::open_or_create(used_path.clone(), header()).unwrap();
    used.append(EntryPayload::User(UserMessage::text("hi"))).unwrap();

    let removed = remove_header_only_sessions(dir.path());

    assert_eq!(removed, 1);
    assert!(!empty_path.exists());
    assert!(used_path.exists());
}

#[test]
fn missing_directory_is_a_no_op() {
    assert_eq!(remove_header_only_sessions(std::path::Path::new("/nonexistent/dir")), 0);
}
