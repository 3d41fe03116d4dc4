use std::sync::Arc;

use cocode_hooks::HookRegistry;
use cocode_protocol::CompactConfig;
use cocode_protocol::LoopConfig;
use cocode_tools_api::ToolRegistry;
use hyper_sdk::MockProvider;
use tempfile::TempDir;

use super::*;
use crate::session::AgentSessionConfig;

#[test]
fn new_manager_starts_empty() {
    let manager = SessionManager::new();
    assert_eq!(manager.active_count(), 0);
    assert!(manager.active_session_id().is_none());
}

#[test]
fn with_storage_dir_remembers_the_path() {
    let manager = SessionManager::with_storage_dir(PathBuf::from("/custom/path"));
    assert_eq!(manager.storage_dir, PathBuf::from("/custom/path"));
}

#[test]
fn list_active_is_empty_before_any_registration() {
    let manager = SessionManager::new();
    assert!(manager.list_active().is_empty());
}

#[tokio::test]
async fn list_persisted_is_empty_for_an_empty_dir() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SessionManager::with_storage_dir(temp_dir.path().to_path_buf());
    let persisted = manager.list_persisted().await.unwrap();
    assert!(persisted.is_empty());
}

#[tokio::test]
async fn list_persisted_is_empty_for_a_nonexistent_dir() {
    let manager = SessionManager::with_storage_dir(PathBuf::from("/nonexistent/path/for/tests"));
    let persisted = manager.list_persisted().await.unwrap();
    assert!(persisted.is_empty());
}

#[tokio::test]
async fn list_persisted_finds_session_files_under_every_cwd_directory() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SessionManager::with_storage_dir(temp_dir.path().to_path_buf());

    let config = AgentSessionConfig {
        base_dir: temp_dir.path().to_path_buf(),
        cwd: PathBuf::from("/work/project"),
        provider_name: "mock".to_string(),
        model_id: "mock-model".to_string(),
        thinking_level: None,
        loop_config: LoopConfig::default(),
        fallback_config: cocode_loop::FallbackConfig::default(),
        compact_config: CompactConfig::default(),
        context_window: 100_000,
    };
    let session = AgentSession::create(
        config,
        Arc::new(MockProvider::new("mock", vec![])),
        Arc::new(ToolRegistry::new()),
        Arc::new(HookRegistry::new()),
    )
    .unwrap();

    manager.register(session);

    let persisted = manager.list_persisted().await.unwrap();
    assert_eq!(persisted.len(), 1);
}

#[tokio::test]
async fn registering_a_session_makes_it_the_active_one() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SessionManager::with_storage_dir(temp_dir.path().to_path_buf());

    let config = AgentSessionConfig {
        base_dir: temp_dir.path().to_path_buf(),
        cwd: PathBuf::from("/work/project"),
        provider_name: "mock".to_string(),
        model_id: "mock-model".to_string(),
        thinking_level: None,
        loop_config: LoopConfig::default(),
        fallback_config: cocode_loop::FallbackConfig::default(),
        compact_config: CompactConfig::default(),
        context_window: 100_000,
    };
    let session = AgentSession::create(
        config,
        Arc::new(MockProvider::new("mock", vec![])),
        Arc::new(ToolRegistry::new()),
        Arc::new(HookRegistry::new()),
    )
    .unwrap();
    let session_id = session.session_id().to_string();

    manager.register(session);

    assert_eq!(manager.active_count(), 1);
    assert_eq!(manager.active_session_id(), Some(session_id));
}

#[tokio::test]
async fn get_fails_for_an_unregistered_session_id() {
    let manager = SessionManager::new();
    let err = manager.get("nope").unwrap_err();
    assert!(matches!(err, crate::error::AgentError::UnknownSession { .. }));
}
