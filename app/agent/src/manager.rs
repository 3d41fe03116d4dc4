//! Multi-session bookkeeping on top of [`crate::AgentSession`]: the set of
//! sessions currently loaded in memory, and a directory listing of the
//! ones only persisted to disk.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::RwLock;

use cocode_hooks::HookApi;
use cocode_hooks::HookContext;
use cocode_hooks::HookEvent;
use cocode_hooks::HookRegistry;
use snafu::ResultExt;
use tokio::sync::Mutex as AsyncMutex;
use tracing::info;

use crate::error::Result;
use crate::error::agent_error::IoSnafu;
use crate::error::agent_error::UnknownSessionSnafu;
use crate::session::AgentSession;

/// Registry of sessions currently held in memory, keyed by session id, plus
/// the storage root new sessions are created under.
pub struct SessionManager {
    storage_dir: PathBuf,
    active: RwLock<HashMap<String, Arc<AsyncMutex<AgentSession>>>>,
    active_session_id: RwLock<Option<String>>,
    hooks: Arc<HookRegistry>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_storage_dir(default_storage_dir())
    }

    pub fn with_storage_dir(storage_dir: PathBuf) -> Self {
        Self {
            storage_dir,
            active: RwLock::new(HashMap::new()),
            active_session_id: RwLock::new(None),
            hooks: Arc::new(HookRegistry::new()),
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn active_count(&self) -> usize {
        self.active.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Session ids currently loaded in memory, in no particular order.
    pub fn list_active(&self) -> Vec<String> {
        self.active.read().map(|m| m.keys().cloned().collect()).unwrap_or_default()
    }

    /// Session files under `storage_dir` for every working directory seen
    /// so far, whether or not they're currently loaded.
    pub async fn list_persisted(&self) -> Result<Vec<PathBuf>> {
        let sessions_root = self.storage_dir.join("sessions");
        let mut cwd_dirs = match tokio::fs::read_dir(&sessions_root).await {
            Ok(rd) => rd,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err).context(IoSnafu { path: sessions_root.clone() }),
        };

        let mut files = Vec::new();
        while let Some(cwd_dir) = cwd_dirs.next_entry().await.context(IoSnafu { path: sessions_root.clone() })? {
            if !cwd_dir.file_type().await.map(|ft| ft.is_dir()).unwrap_or(false) {
                continue;
            }
            let mut entries = tokio::fs::read_dir(cwd_dir.path()).await.context(IoSnafu { path: cwd_dir.path() })?;
            while let Some(entry) = entries.next_entry().await.context(IoSnafu { path: cwd_dir.path() })? {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "jsonl") {
                    files.push(path);
                }
            }
        }
        Ok(files)
    }

    /// Registers a loaded session, making it reachable by
    /// [`Self::get`]/[`Self::switch_session`]. The first session registered
    /// becomes the active one.
    pub fn register(&self, session: AgentSession) -> Arc<AsyncMutex<AgentSession>> {
        let session_id = session.session_id().to_string();
        let handle = Arc::new(AsyncMutex::new(session));
        let mut active = self.active.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        active.insert(session_id.clone(), handle.clone());
        drop(active);
        let mut active_id = self.active_session_id.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if active_id.is_none() {
            *active_id = Some(session_id.clone());
        }
        drop(active_id);
        info!(session_id = %session_id, "registered session");
        handle
    }

    pub fn get(&self, session_id: &str) -> Result<Arc<AsyncMutex<AgentSession>>> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(session_id)
            .cloned()
            .ok_or_else(|| UnknownSessionSnafu { session_id: session_id.to_string() }.build())
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.active_session_id.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Makes `session_id` the active session (control-plane
    /// `switch_session`), after letting `session_before_switch` hooks veto
    /// the move.
    pub async fn switch_session(&self, session_id: &str) -> Result<Arc<AsyncMutex<AgentSession>>> {
        let handle = self.get(session_id)?;
        let to_leaf_id = handle.lock().await.get_state().await.current_leaf.to_string();

        let hook_ctx = HookContext::new(session_id.to_string(), self.storage_dir.clone());
        let api = HookApi::with_null_host();
        let outcomes = self.hooks.dispatch(&HookEvent::SessionBeforeSwitch { to_leaf_id }, &hook_ctx, &api).await;
        if outcomes.iter().any(|o| o.result.is_cancel()) {
            return self.get(
                self.active_session_id()
                    .as_deref()
                    .unwrap_or(session_id),
            );
        }

        *self.active_session_id.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session_id.to_string());
        info!(session_id = %session_id, "switched active session");
        Ok(handle)
    }

    /// Drops a session from the in-memory registry without touching its
    /// file on disk.
    pub fn forget(&self, session_id: &str) {
        self.active.write().unwrap_or_else(|poisoned| poisoned.into_inner()).remove(session_id);
        let mut active_id = self.active_session_id.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if active_id.as_deref() == Some(session_id) {
            *active_id = None;
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".cocode")
}

#[cfg(test)]
#[path = "manager.test.rs"]
mod tests;
