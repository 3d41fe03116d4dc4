use std::sync::Arc;

use cocode_hooks::HookRegistry;
use cocode_loop::FallbackConfig;
use cocode_protocol::CompactConfig;
use cocode_protocol::EntryPayload;
use cocode_protocol::LoopConfig;
use cocode_tools_api::ToolRegistry;
use hyper_sdk::MockProvider;
use hyper_sdk::MockReply;
use tempfile::TempDir;

use super::*;

fn config(base_dir: &TempDir) -> AgentSessionConfig {
    AgentSessionConfig {
        base_dir: base_dir.path().to_path_buf(),
        cwd: PathBuf::from("/work"),
        provider_name: "mock".to_string(),
        model_id: "mock-model".to_string(),
        thinking_level: None,
        loop_config: LoopConfig::default(),
        fallback_config: FallbackConfig::default(),
        compact_config: CompactConfig::default(),
        context_window: 100_000,
    }
}

fn new_session(dir: &TempDir, replies: Vec<MockReply>) -> AgentSession {
    AgentSession::create(
        config(dir),
        Arc::new(MockProvider::new("mock", replies)),
        Arc::new(ToolRegistry::new()),
        Arc::new(HookRegistry::new()),
    )
    .unwrap()
}

#[test]
fn config_from_runtime_carries_the_loop_and_compact_settings_through() {
    let runtime = cocode_config::RuntimeConfig {
        r#loop: LoopConfig { max_turns: Some(5), ..LoopConfig::default() },
        compact: CompactConfig::default(),
    };
    let config = AgentSessionConfig::from_runtime(runtime, PathBuf::from("/base"), PathBuf::from("/work"), "mock", "mock-model", 100_000);
    assert_eq!(config.loop_config.max_turns, Some(5));
    assert_eq!(config.context_window, 100_000);
}

#[test]
fn default_tool_registry_includes_the_builtin_tools() {
    let registry = default_tool_registry();
    assert!(registry.has("Read"));
    assert!(registry.has("Bash"));
}

#[tokio::test]
async fn create_starts_a_session_with_a_header_and_no_turns_yet() {
    let dir = TempDir::new().unwrap();
    let session = new_session(&dir, vec![]);

    let state = session.get_state().await;
    assert_eq!(state.provider_name, "mock");
    assert_eq!(state.model_id, "mock-model");
    assert_eq!(state.turn_number, 0);
}

#[tokio::test]
async fn prompt_drives_the_loop_and_appends_to_the_branch() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir, vec![MockReply::text("hi there")]);

    let result = session.prompt("hello").await.unwrap();
    assert_eq!(result.final_text, "hi there");

    let messages = session.get_messages().await;
    assert!(messages.iter().any(|e| matches!(e.payload, EntryPayload::User(_))));
    assert!(messages.iter().any(|e| matches!(e.payload, EntryPayload::Assistant(_))));
}

#[tokio::test]
async fn set_model_records_a_model_change_entry_without_touching_the_live_provider() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir, vec![]);

    session.set_model("other-provider", "other-model").await.unwrap();

    let messages = session.get_messages().await;
    let change = messages.iter().find_map(|e| match &e.payload {
        EntryPayload::ModelChange(m) => Some(m),
        _ => None,
    });
    assert_eq!(change.unwrap().model_id, "other-model");

    let state = session.get_state().await;
    assert_eq!(state.provider_name, "other-provider");
    assert_eq!(state.model_id, "mock-model");
}

#[tokio::test]
async fn set_thinking_level_records_an_entry_and_updates_state() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir, vec![]);

    session.set_thinking_level("high").await.unwrap();

    let state = session.get_state().await;
    assert_eq!(state.thinking_level.as_deref(), Some("high"));
}

#[tokio::test]
async fn reset_starts_a_fresh_session_with_a_new_id() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir, vec![MockReply::text("hi")]);
    session.prompt("hello").await.unwrap();
    let old_id = session.session_id().to_string();

    session.reset().await.unwrap();

    assert_ne!(session.session_id(), old_id);
    let messages = session.get_messages().await;
    assert_eq!(messages.len(), 1);
    assert!(matches!(messages[0].payload, EntryPayload::Header(_)));
}

#[tokio::test]
async fn branch_forks_a_new_session_file_and_leaves_a_summary_behind() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir, vec![MockReply::text("first"), MockReply::text("second")]);

    session.prompt("one").await.unwrap();
    let after_first = session.get_state().await.current_leaf;
    session.prompt("two").await.unwrap();
    let origin_id = session.session_id().to_string();

    session.branch(after_first).await.unwrap();

    assert_ne!(session.session_id(), origin_id);
    let state = session.get_state().await;
    assert_eq!(state.current_leaf, after_first);

    let forked_messages = session.get_messages().await;
    let header = forked_messages.iter().find_map(|e| match &e.payload {
        EntryPayload::Header(h) => Some(h),
        _ => None,
    });
    assert_eq!(header.unwrap().branched_from.as_deref(), Some(origin_id.as_str()));
    assert!(forked_messages.iter().any(|e| matches!(e.payload, EntryPayload::User(_))));

    let origin_path = dir
        .path()
        .join("sessions")
        .join(cocode_session::escape_cwd(&PathBuf::from("/work")));
    let origin_file = std::fs::read_dir(&origin_path)
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.path().to_string_lossy().contains(&origin_id))
        .unwrap()
        .path();
    let raw = std::fs::read_to_string(origin_file).unwrap();
    assert!(raw.contains("branch_summary"));
}

#[tokio::test]
async fn compact_runs_even_below_the_configured_threshold() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.compact_config = CompactConfig { keep_recent_tokens: 0, ..CompactConfig::default() };
    let mut session = AgentSession::create(
        cfg,
        Arc::new(MockProvider::new("mock", vec![MockReply::text("hi"), MockReply::text("summary")])),
        Arc::new(ToolRegistry::new()),
        Arc::new(HookRegistry::new()),
    )
    .unwrap();
    session.prompt("hello").await.unwrap();

    session.compact().await.unwrap();

    let messages = session.get_messages().await;
    assert!(messages.iter().any(|e| matches!(e.payload, EntryPayload::Compaction(_))));
}
