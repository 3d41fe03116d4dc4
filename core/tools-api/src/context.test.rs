use super::*;

#[test]
fn approval_store_tracks_pattern_and_session_approvals() {
    let mut store = ApprovalStore::new();
    assert!(!store.is_approved("Bash", "git status"));
    store.approve_pattern("Bash", "git status");
    assert!(store.is_approved("Bash", "git status"));
    assert!(!store.is_approved("Bash", "rm -rf"));

    store.approve_session("Read");
    assert!(store.is_approved("Read", "anything"));
}

#[test]
fn file_tracker_distinguishes_read_from_modified() {
    let mut tracker = FileTracker::new();
    let path = PathBuf::from("/tmp/file.txt");
    assert!(!tracker.was_read(&path));
    tracker.record_read(&path);
    assert!(tracker.was_read(&path));
    assert!(!tracker.was_modified(&path));
    tracker.record_modified(&path);
    assert!(tracker.was_modified(&path));
}

#[tokio::test]
async fn new_context_starts_uncancelled_with_default_permission_mode() {
    let ctx = ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"));
    assert_eq!(ctx.call_id, "call-1");
    assert!(!ctx.is_cancelled());
    assert_eq!(ctx.permission_mode, PermissionMode::Default);
}

#[test]
fn resolve_path_joins_relative_and_passes_through_absolute() {
    let ctx = ToolContext::new("call-1", "session-1", PathBuf::from("/home/user/project"));
    assert_eq!(ctx.resolve_path("src/main.rs"), PathBuf::from("/home/user/project/src/main.rs"));
    assert_eq!(ctx.resolve_path("/etc/passwd"), PathBuf::from("/etc/passwd"));
}

#[tokio::test]
async fn builder_sets_permission_mode() {
    let ctx = ToolContextBuilder::new("call-1", "session-1", PathBuf::from("/tmp"))
        .permission_mode(PermissionMode::Plan)
        .build();
    assert_eq!(ctx.permission_mode, PermissionMode::Plan);
}

#[test]
fn should_flush_defaults_true_without_a_batch_hint() {
    let ctx = ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"));
    assert!(ctx.should_flush());
}

#[test]
fn should_flush_follows_the_batch_hint_once_set() {
    let ctx = ToolContextBuilder::new("call-1", "session-1", PathBuf::from("/tmp"))
        .write_batch(WriteBatchHint { batch_id: "batch-1".to_string(), flush: false })
        .build();
    assert!(!ctx.should_flush());
}

#[tokio::test]
async fn canonical_args_round_trip_through_take() {
    let ctx = ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"));
    assert!(ctx.take_canonical_args().await.is_none());
    ctx.set_canonical_args(serde_json::json!({"file_path": "/abs/path"})).await;
    let taken = ctx.take_canonical_args().await;
    assert_eq!(taken, Some(serde_json::json!({"file_path": "/abs/path"})));
    assert!(ctx.take_canonical_args().await.is_none());
}

#[tokio::test]
async fn cancel_token_propagates_to_is_cancelled() {
    let token = CancellationToken::new();
    let ctx = ToolContextBuilder::new("call-1", "session-1", PathBuf::from("/tmp"))
        .cancel_token(token.clone())
        .build();
    assert!(!ctx.is_cancelled());
    token.cancel();
    assert!(ctx.is_cancelled());
}
