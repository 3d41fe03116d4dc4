//! A single driven session: an [`cocode_loop::AgentLoop`] plus the
//! control-plane commands that operate on it between `prompt()` calls.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use cocode_hooks::HookApi;
use cocode_hooks::HookContext;
use cocode_hooks::HookEvent;
use cocode_hooks::HookRegistry;
use cocode_loop::AgentLoop;
use cocode_loop::FallbackConfig;
use cocode_loop::LoopResult;
use cocode_protocol::CompactConfig;
use cocode_protocol::EntryPayload;
use cocode_protocol::LoopConfig;
use cocode_protocol::ModelChangeEntry;
use cocode_protocol::SessionEntry;
use cocode_protocol::SessionHeader;
use cocode_protocol::ThinkingLevelChangeEntry;
use cocode_session::SessionStore;
use cocode_session::session_file_path;
use cocode_tools_api::ToolRegistry;
use hyper_sdk::Provider;
use serde::Serialize;
use snafu::ResultExt;
use tokio::sync::Mutex as AsyncMutex;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;

/// Everything needed to (re)create a session's loop: durable config that
/// survives a `reset()`, since the loop itself is rebuilt from scratch
/// rather than mutated in place.
#[derive(Debug, Clone)]
pub struct AgentSessionConfig {
    pub base_dir: PathBuf,
    pub cwd: PathBuf,
    pub provider_name: String,
    pub model_id: String,
    pub thinking_level: Option<String>,
    pub loop_config: LoopConfig,
    pub fallback_config: FallbackConfig,
    pub compact_config: CompactConfig,
    pub context_window: i64,
}

impl AgentSessionConfig {
    /// Builds loop/compaction knobs from a loaded [`cocode_config::RuntimeConfig`]
    /// rather than hand-rolling `LoopConfig`/`CompactConfig` defaults here.
    pub fn from_runtime(
        runtime: cocode_config::RuntimeConfig,
        base_dir: PathBuf,
        cwd: PathBuf,
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
        context_window: i64,
    ) -> Self {
        Self {
            base_dir,
            cwd,
            provider_name: provider_name.into(),
            model_id: model_id.into(),
            thinking_level: None,
            loop_config: runtime.r#loop,
            fallback_config: FallbackConfig::default(),
            compact_config: runtime.compact,
            context_window,
        }
    }
}

/// A snapshot of a session's current state, returned by `get_state`
/// without holding any lock open.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSessionState {
    pub session_id: String,
    pub cwd: PathBuf,
    pub provider_name: String,
    pub model_id: String,
    pub thinking_level: Option<String>,
    pub turn_number: i32,
    pub total_input_tokens: i64,
    pub total_output_tokens: i64,
    pub current_leaf: Uuid,
    pub is_cancelled: bool,
}

/// One driven conversation: a session file, the loop that advances it, and
/// the shared tool/hook registries it was built with.
pub struct AgentSession {
    agent_loop: AgentLoop,
    hooks: Arc<HookRegistry>,
    tool_registry: Arc<ToolRegistry>,
    provider: Arc<dyn Provider>,
    config: AgentSessionConfig,
    session_id: String,
}

impl std::fmt::Debug for AgentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSession").field("session_id", &self.session_id).finish_non_exhaustive()
    }
}

/// A [`ToolRegistry`] preloaded with the built-in read/write/edit/grep/
/// find/bash toolset, for hosts that don't need a custom set.
pub fn default_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    cocode_tools::register_builtin_tools(&mut registry);
    registry
}

impl AgentSession {
    /// Starts a brand-new session file under `config.base_dir`.
    pub fn create(
        config: AgentSessionConfig,
        provider: Arc<dyn Provider>,
        tool_registry: Arc<ToolRegistry>,
        hooks: Arc<HookRegistry>,
    ) -> Result<Self> {
        let session_id = Uuid::new_v4();
        let path = session_file_path(&config.base_dir, &config.cwd, Utc::now(), session_id);
        let header = header_for(&config, session_id.to_string(), None);
        let store = SessionStore::open_or_create(path, header).context(crate::error::agent_error::SessionSnafu)?;
        let session = Arc::new(AsyncMutex::new(store));
        let agent_loop = build_loop(session, &config, provider.clone(), tool_registry.clone(), hooks.clone());
        info!(session_id = %session_id, cwd = %config.cwd.display(), "created session");
        Ok(Self { agent_loop, hooks, tool_registry, provider, config, session_id: session_id.to_string() })
    }

    /// Re-opens an existing session file at `path`, replaying its entries.
    /// `config` supplies the loop/compaction knobs and the header fallback
    /// used only if `path` doesn't already exist.
    pub fn resume(
        path: PathBuf,
        config: AgentSessionConfig,
        provider: Arc<dyn Provider>,
        tool_registry: Arc<ToolRegistry>,
        hooks: Arc<HookRegistry>,
    ) -> Result<Self> {
        let header = header_for(&config, Uuid::new_v4().to_string(), None);
        let store = SessionStore::open_or_create(path, header).context(crate::error::agent_error::SessionSnafu)?;
        let session_id = store
            .branch()
            .into_iter()
            .find_map(|entry| match entry.payload {
                EntryPayload::Header(h) => Some(h.session_id),
                _ => None,
            })
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let session = Arc::new(AsyncMutex::new(store));
        let agent_loop = build_loop(session, &config, provider.clone(), tool_registry.clone(), hooks.clone());
        Ok(Self { agent_loop, hooks, tool_registry, provider, config, session_id })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn cwd(&self) -> &Path {
        &self.config.cwd
    }

    /// Drives the loop with a new user prompt (control-plane `prompt`).
    pub async fn prompt(&mut self, text: impl Into<String>) -> Result<LoopResult> {
        self.agent_loop.prompt(text).await.context(crate::error::agent_error::LoopSnafu)
    }

    /// Queues a steering message, consumed at the next `DRAIN_STEERING`
    /// boundary (control-plane `queue_message`).
    pub fn queue_message(&mut self, text: impl Into<String>) {
        self.agent_loop.queue_steering(text);
    }

    /// Requests cancellation of any in-flight turn (control-plane `abort`).
    pub fn abort(&self) {
        self.agent_loop.abort();
    }

    /// Starts a fresh session file with the same config, after letting
    /// `session_before_new` hooks veto the reset (control-plane `reset`).
    pub async fn reset(&mut self) -> Result<()> {
        let hook_ctx = HookContext::new(self.session_id.clone(), self.config.cwd.clone());
        let api = HookApi::with_null_host();
        let outcomes = self.hooks.dispatch(&HookEvent::SessionBeforeNew, &hook_ctx, &api).await;
        if outcomes.iter().any(|o| o.result.is_cancel()) {
            return Ok(());
        }
        self.agent_loop.abort();

        let session_id = Uuid::new_v4();
        let path = session_file_path(&self.config.base_dir, &self.config.cwd, Utc::now(), session_id);
        let header = header_for(&self.config, session_id.to_string(), None);
        let store = SessionStore::open_or_create(path, header).context(crate::error::agent_error::SessionSnafu)?;
        let session = Arc::new(AsyncMutex::new(store));
        self.agent_loop = build_loop(session, &self.config, self.provider.clone(), self.tool_registry.clone(), self.hooks.clone());
        info!(old_session_id = %self.session_id, new_session_id = %session_id, "reset session");
        self.session_id = session_id.to_string();
        Ok(())
    }

    /// A point-in-time snapshot (control-plane `get_state`).
    pub async fn get_state(&self) -> AgentSessionState {
        let current_leaf = self.agent_loop.session().lock().await.current_leaf();
        AgentSessionState {
            session_id: self.session_id.clone(),
            cwd: self.config.cwd.clone(),
            provider_name: self.config.provider_name.clone(),
            model_id: self.agent_loop.current_model().to_string(),
            thinking_level: self.config.thinking_level.clone(),
            turn_number: self.agent_loop.turn_number(),
            total_input_tokens: self.agent_loop.total_input_tokens(),
            total_output_tokens: self.agent_loop.total_output_tokens(),
            current_leaf,
            is_cancelled: self.agent_loop.is_cancelled(),
        }
    }

    /// Records a model change (control-plane `set_model`). The loop keeps
    /// one `Arc<dyn Provider>` for its whole lifetime, so this only labels
    /// the session going forward — it does not hot-swap the provider
    /// driving the in-flight loop. A real provider switch needs a new
    /// `AgentSession` built against the new provider.
    pub async fn set_model(&mut self, provider_name: impl Into<String>, model_id: impl Into<String>) -> Result<()> {
        let provider_name = provider_name.into();
        let model_id = model_id.into();
        self.agent_loop
            .session()
            .lock()
            .await
            .append(EntryPayload::ModelChange(ModelChangeEntry {
                provider: provider_name.clone(),
                model_id: model_id.clone(),
            }))
            .context(crate::error::agent_error::SessionSnafu)?;
        self.config.provider_name = provider_name;
        self.config.model_id = model_id;
        Ok(())
    }

    /// Records a thinking-level change (control-plane `set_thinking_level`).
    pub async fn set_thinking_level(&mut self, level: impl Into<String>) -> Result<()> {
        let level = level.into();
        self.agent_loop
            .session()
            .lock()
            .await
            .append(EntryPayload::ThinkingLevelChange(ThinkingLevelChangeEntry { level: level.clone() }))
            .context(crate::error::agent_error::SessionSnafu)?;
        self.config.thinking_level = Some(level);
        Ok(())
    }

    /// Force-runs compaction regardless of the configured threshold
    /// (control-plane `compact`).
    pub async fn compact(&mut self) -> Result<()> {
        self.agent_loop.compact_now().await.context(crate::error::agent_error::LoopSnafu)
    }

    /// Forks a new session file from `from_id` (control-plane `branch`),
    /// after letting `session_before_branch` hooks veto the fork. The new
    /// file carries a header with `branched_from` set to this session's
    /// id and a replay of every entry up to `from_id`; this session keeps
    /// running on its current file, with a `BranchSummaryEntry` appended
    /// marking where the fork happened.
    pub async fn branch(&mut self, from_id: Uuid) -> Result<()> {
        let hook_ctx = HookContext::new(self.session_id.clone(), self.config.cwd.clone());
        let api = HookApi::with_null_host();
        let event = HookEvent::SessionBeforeBranch { from_id: from_id.to_string() };
        let outcomes = self.hooks.dispatch(&event, &hook_ctx, &api).await;
        if outcomes.iter().any(|o| o.result.is_cancel()) {
            return Ok(());
        }

        let new_session_id = Uuid::new_v4();
        let new_path = session_file_path(&self.config.base_dir, &self.config.cwd, Utc::now(), new_session_id);
        let new_header = header_for(&self.config, new_session_id.to_string(), Some(self.session_id.clone()));
        let forked = self
            .agent_loop
            .session()
            .lock()
            .await
            .fork(from_id, new_path, new_header)
            .context(crate::error::agent_error::SessionSnafu)?;

        let session = Arc::new(AsyncMutex::new(forked));
        self.agent_loop = build_loop(session, &self.config, self.provider.clone(), self.tool_registry.clone(), self.hooks.clone());
        info!(old_session_id = %self.session_id, new_session_id = %new_session_id, from_id = %from_id, "branched session");
        self.session_id = new_session_id.to_string();
        Ok(())
    }

    /// The current branch, root-first (control-plane `get_messages`).
    pub async fn get_messages(&self) -> Vec<SessionEntry> {
        self.agent_loop.session().lock().await.branch()
    }
}

fn header_for(config: &AgentSessionConfig, session_id: String, branched_from: Option<String>) -> SessionHeader {
    SessionHeader {
        session_id,
        cwd: config.cwd.to_string_lossy().to_string(),
        provider: config.provider_name.clone(),
        model_id: config.model_id.clone(),
        thinking_level: config.thinking_level.clone(),
        branched_from,
    }
}

fn build_loop(
    session: Arc<AsyncMutex<SessionStore>>,
    config: &AgentSessionConfig,
    provider: Arc<dyn Provider>,
    tool_registry: Arc<ToolRegistry>,
    hooks: Arc<HookRegistry>,
) -> AgentLoop {
    AgentLoop::builder()
        .session(session)
        .provider(provider)
        .tool_registry(tool_registry)
        .hooks(hooks)
        .config(config.loop_config)
        .fallback_config(config.fallback_config.clone())
        .compact_config(config.compact_config)
        .context_window(config.context_window)
        .cwd(config.cwd.clone())
        .model(config.model_id.clone())
        .build()
}

#[cfg(test)]
#[path = "session.test.rs"]
mod tests;
