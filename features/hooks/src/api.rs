//! `HookApi`: the capability handle passed to every hook factory at
//! registration time and captured by its closures for use at dispatch time.
//!
//! `sendMessage`/`appendEntry` need to reach the session store, but this
//! crate must not depend on `cocode-session` directly — that dependency
//! belongs to the loop crate that owns both the session and the hook bus.
//! So those two capabilities are delegated through the `HookHost` trait,
//! which the loop crate implements over a real `SessionStore`.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use snafu::ResultExt;

use crate::error::Result;
use crate::error::hook_error::ExecSnafu;

/// Implemented by whatever owns the session store, so hooks can append
/// `CustomMessageEntry`/`CustomEntry` without this crate depending on
/// `cocode-session`.
#[async_trait]
pub trait HookHost: Send + Sync {
    async fn send_message(&self, content: Value, trigger_turn: bool) -> Result<()>;
    async fn append_entry(&self, custom_type: String, data: Value) -> Result<()>;
}

/// A host with no session attached; `sendMessage`/`appendEntry` succeed
/// and are silently dropped. Useful for dispatching hooks in contexts
/// that have no session to mutate (tests, dry runs).
#[derive(Debug, Default)]
pub struct NullHost;

#[async_trait]
impl HookHost for NullHost {
    async fn send_message(&self, _content: Value, _trigger_turn: bool) -> Result<()> {
        Ok(())
    }

    async fn append_entry(&self, _custom_type: String, _data: Value) -> Result<()> {
        Ok(())
    }
}

pub type CommandHandler = Arc<dyn Fn(&[String]) -> String + Send + Sync>;
pub type MessageRenderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// `registerCommand`/`registerMessageRenderer` degrade to a real,
/// inspectable registry lookup (no TUI or slash-command dispatcher
/// consumes them in this crate).
pub struct HookApi {
    host: Arc<dyn HookHost>,
    commands: RwLock<HashMap<String, CommandHandler>>,
    renderers: RwLock<HashMap<String, MessageRenderer>>,
}

impl HookApi {
    pub fn new(host: Arc<dyn HookHost>) -> Self {
        Self { host, commands: RwLock::new(HashMap::new()), renderers: RwLock::new(HashMap::new()) }
    }

    pub fn with_null_host() -> Self {
        Self::new(Arc::new(NullHost))
    }

    pub async fn send_message(&self, content: Value, trigger_turn: bool) -> Result<()> {
        self.host.send_message(content, trigger_turn).await
    }

    pub async fn append_entry(&self, custom_type: impl Into<String>, data: Value) -> Result<()> {
        self.host.append_entry(custom_type.into(), data).await
    }

    pub fn register_command(&self, name: impl Into<String>, handler: CommandHandler) {
        if let Ok(mut commands) = self.commands.write() {
            commands.insert(name.into(), handler);
        }
    }

    pub fn register_message_renderer(&self, custom_type: impl Into<String>, renderer: MessageRenderer) {
        if let Ok(mut renderers) = self.renderers.write() {
            renderers.insert(custom_type.into(), renderer);
        }
    }

    pub fn registered_commands(&self) -> Vec<String> {
        self.commands.read().map(|c| c.keys().cloned().collect()).unwrap_or_default()
    }

    pub fn registered_renderers(&self) -> Vec<String> {
        self.renderers.read().map(|r| r.keys().cloned().collect()).unwrap_or_default()
    }

    /// Shells out with no cancellation wiring of its own — the loop crate
    /// is expected to race this against the prompt's cancellation token
    /// the same way `cocode-tools`' `Bash` tool does.
    pub async fn exec(&self, cmd: &str, args: &[String]) -> Result<std::process::Output> {
        tokio::process::Command::new(cmd).args(args).output().await.context(ExecSnafu)
    }
}

#[cfg(test)]
#[path = "api.test.rs"]
mod tests;
