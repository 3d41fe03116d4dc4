//! Everything a tool needs during execution: call identity, working
//! directory, permission state, an event channel, and cancellation.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use cocode_protocol::LoopEvent;
use cocode_protocol::WriteBatchHint;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::permission::PermissionMode;

/// Approvals a user has granted during the session, consulted by
/// `Tool::check_permission` before a gated tool runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalStore {
    approved_patterns: HashSet<String>,
    session_approvals: HashSet<String>,
}

impl ApprovalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_approved(&self, tool_name: &str, pattern: &str) -> bool {
        let key = format!("{tool_name}:{pattern}");
        self.approved_patterns.contains(&key) || self.session_approvals.contains(tool_name)
    }

    pub fn approve_pattern(&mut self, tool_name: &str, pattern: &str) {
        self.approved_patterns.insert(format!("{tool_name}:{pattern}"));
    }

    pub fn approve_session(&mut self, tool_name: &str) {
        self.session_approvals.insert(tool_name.to_string());
    }
}

/// Files touched during a turn, consulted for normative-rewrite and LSP
/// flush decisions.
#[derive(Debug, Clone, Default)]
pub struct FileTracker {
    read_files: HashSet<PathBuf>,
    modified_files: HashSet<PathBuf>,
}

impl FileTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&mut self, path: impl Into<PathBuf>) {
        self.read_files.insert(path.into());
    }

    pub fn record_modified(&mut self, path: impl Into<PathBuf>) {
        self.modified_files.insert(path.into());
    }

    pub fn was_read(&self, path: &PathBuf) -> bool {
        self.read_files.contains(path)
    }

    pub fn was_modified(&self, path: &PathBuf) -> bool {
        self.modified_files.contains(path)
    }
}

#[derive(Clone)]
pub struct ToolContext {
    pub call_id: String,
    pub session_id: String,
    pub cwd: PathBuf,
    pub permission_mode: PermissionMode,
    pub event_tx: Option<mpsc::Sender<LoopEvent>>,
    pub cancel_token: CancellationToken,
    pub approval_store: Arc<Mutex<ApprovalStore>>,
    pub file_tracker: Arc<Mutex<FileTracker>>,
    /// Set by the batch executor on write/edit calls; `None` means the call is not part of a batch and should
    /// flush immediately.
    pub write_batch: Option<WriteBatchHint>,
    /// A tool that canonicalizes its own arguments during execution (e.g.
    /// resolving a relative path to absolute) stashes the canonical form
    /// here; the executor reads it back after `execute` returns and hands
    /// it to the scheduler for the normative rewrite.
    pub canonical_args: Arc<Mutex<Option<serde_json::Value>>>,
}

impl ToolContext {
    pub fn new(call_id: impl Into<String>, session_id: impl Into<String>, cwd: PathBuf) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: session_id.into(),
            cwd,
            permission_mode: PermissionMode::default(),
            event_tx: None,
            cancel_token: CancellationToken::new(),
            approval_store: Arc::new(Mutex::new(ApprovalStore::new())),
            file_tracker: Arc::new(Mutex::new(FileTracker::new())),
            write_batch: None,
            canonical_args: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn set_canonical_args(&self, value: serde_json::Value) {
        *self.canonical_args.lock().await = Some(value);
    }

    pub async fn take_canonical_args(&self) -> Option<serde_json::Value> {
        self.canonical_args.lock().await.take()
    }

    /// A write/edit tool should flush formatting/LSP side effects only when
    /// this returns true: either there is no batch hint (solo call) or the
    /// scheduler marked this call as the batch's last write.
    pub fn should_flush(&self) -> bool {
        self.write_batch.as_ref().is_none_or(|hint| hint.flush)
    }

    /// Emits the tool's progress as a `tool_execution_update` loop event
    ///, the streaming path for bash live
    /// output and long reads.
    pub async fn emit_update(&self, partial: serde_json::Value) {
        if let Some(tx) = &self.event_tx {
            let _ = tx
                .send(LoopEvent::ToolExecutionUpdate { call_id: self.call_id.clone(), partial })
                .await;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.cancel_token.cancelled().await
    }

    pub async fn record_file_read(&self, path: impl Into<PathBuf>) {
        self.file_tracker.lock().await.record_read(path);
    }

    pub async fn record_file_modified(&self, path: impl Into<PathBuf>) {
        self.file_tracker.lock().await.record_modified(path);
    }

    pub async fn is_approved(&self, tool_name: &str, pattern: &str) -> bool {
        self.approval_store.lock().await.is_approved(tool_name, pattern)
    }

    pub async fn approve_pattern(&self, tool_name: &str, pattern: &str) {
        self.approval_store.lock().await.approve_pattern(tool_name, pattern);
    }

    pub async fn approve_session(&self, tool_name: &str) {
        self.approval_store.lock().await.approve_session(tool_name);
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() { path } else { self.cwd.join(path) }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("call_id", &self.call_id)
            .field("session_id", &self.session_id)
            .field("cwd", &self.cwd)
            .field("permission_mode", &self.permission_mode)
            .field("is_cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

pub struct ToolContextBuilder {
    call_id: String,
    session_id: String,
    cwd: PathBuf,
    permission_mode: PermissionMode,
    event_tx: Option<mpsc::Sender<LoopEvent>>,
    cancel_token: CancellationToken,
    approval_store: Arc<Mutex<ApprovalStore>>,
    file_tracker: Arc<Mutex<FileTracker>>,
    write_batch: Option<WriteBatchHint>,
}

impl ToolContextBuilder {
    pub fn new(call_id: impl Into<String>, session_id: impl Into<String>, cwd: PathBuf) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: session_id.into(),
            cwd,
            permission_mode: PermissionMode::default(),
            event_tx: None,
            cancel_token: CancellationToken::new(),
            approval_store: Arc::new(Mutex::new(ApprovalStore::new())),
            file_tracker: Arc::new(Mutex::new(FileTracker::new())),
            write_batch: None,
        }
    }

    pub fn write_batch(mut self, hint: WriteBatchHint) -> Self {
        self.write_batch = Some(hint);
        self
    }

    pub fn permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = mode;
        self
    }

    pub fn event_tx(mut self, tx: mpsc::Sender<LoopEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn approval_store(mut self, store: Arc<Mutex<ApprovalStore>>) -> Self {
        self.approval_store = store;
        self
    }

    pub fn file_tracker(mut self, tracker: Arc<Mutex<FileTracker>>) -> Self {
        self.file_tracker = tracker;
        self
    }

    pub fn build(self) -> ToolContext {
        ToolContext {
            call_id: self.call_id,
            session_id: self.session_id,
            cwd: self.cwd,
            permission_mode: self.permission_mode,
            event_tx: self.event_tx,
            cancel_token: self.cancel_token,
            approval_store: self.approval_store,
            file_tracker: self.file_tracker,
            write_batch: self.write_batch,
            canonical_args: Arc::new(Mutex::new(None)),
        }
    }
}

#[cfg(test)]
#[path = "context.test.rs"]
mod tests;
