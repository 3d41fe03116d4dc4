//! Wires `cocode_hooks::HookHost` to a real, shared [`SessionStore`] so
//! hook handlers can call `sendMessage`/`appendEntry` without this crate's
//! session dependency leaking into `cocode-hooks` itself.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use cocode_hooks::HookHost;
use cocode_protocol::CustomContent;
use cocode_protocol::CustomEntry;
use cocode_protocol::CustomMessageEntry;
use cocode_protocol::EntryPayload;
use cocode_session::SessionStore;
use serde_json::Value;
use tokio::sync::Mutex as AsyncMutex;

/// Backing host for [`cocode_hooks::HookApi`]. `sendMessage(..., true)`
/// can't synchronously hand control back to the agent loop (a `HookHost`
/// method only returns `Result<()>`), so it instead raises
/// [`Self::take_pending_trigger`]'s flag; the loop polls it once dispatch
/// for the current event returns.
pub struct SessionHost {
    session: Arc<AsyncMutex<SessionStore>>,
    trigger_pending: Arc<AtomicBool>,
}

impl SessionHost {
    pub fn new(session: Arc<AsyncMutex<SessionStore>>) -> Self {
        Self { session, trigger_pending: Arc::new(AtomicBool::new(false)) }
    }

    pub fn take_pending_trigger(&self) -> bool {
        self.trigger_pending.swap(false, Ordering::SeqCst)
    }
}

#[async_trait]
impl HookHost for SessionHost {
    async fn send_message(&self, content: Value, trigger_turn: bool) -> cocode_hooks::Result<()> {
        let content = match content {
            Value::String(text) => CustomContent::Text(text),
            other => CustomContent::Text(other.to_string()),
        };
        let entry = CustomMessageEntry { custom_type: "hook_message".to_string(), content, display: None, details: None };
        self.session
            .lock()
            .await
            .append(EntryPayload::CustomMessage(entry))
            .map_err(|err| cocode_hooks::HookError::send_message(err.to_string()))?;
        if trigger_turn {
            self.trigger_pending.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn append_entry(&self, custom_type: String, data: Value) -> cocode_hooks::Result<()> {
        self.session
            .lock()
            .await
            .append(EntryPayload::Custom(CustomEntry { custom_type, data }))
            .map_err(|err| cocode_hooks::HookError::append_entry(err.to_string()))?;
        Ok(())
    }
}
