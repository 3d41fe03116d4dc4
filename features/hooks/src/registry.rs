//! Hook registry for storing and dispatching hooks.
//!
//! Dispatch is **sequential** in registration order, not fanned out
//! concurrently: each handler must see the cumulative effect of the ones
//! before it (a `Block` short-circuits the rest, a `ModifyInput` from one
//! handler should be visible to the next), which is only coherent if
//! handlers run one at a time.

use std::sync::Arc;
use std::sync::RwLock;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use cocode_protocol::HookEvent;
use cocode_protocol::HookEventKind;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::api::HookApi;
use crate::context::HookContext;
use crate::result::HookOutcome;
use crate::result::HookResult;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[async_trait]
pub trait HookHandler: Send + Sync {
    async fn handle(&self, event: &HookEvent, ctx: &HookContext, api: &HookApi) -> HookResult;
}

struct Registration {
    name: String,
    kind: HookEventKind,
    handler: Arc<dyn HookHandler>,
    timeout: Duration,
}

/// Central registry a factory populates via `register` at startup; the
/// agent loop then calls `dispatch` once per lifecycle event.
pub struct HookRegistry {
    registrations: RwLock<Vec<Registration>>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { registrations: RwLock::new(Vec::new()) }
    }

    pub fn register(&self, name: impl Into<String>, kind: HookEventKind, handler: Arc<dyn HookHandler>) {
        let name = name.into();
        info!(name = %name, kind = ?kind, "registered hook");
        if let Ok(mut regs) = self.registrations.write() {
            regs.push(Registration { name, kind, handler, timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) });
        }
    }

    pub fn register_with_timeout(&self, name: impl Into<String>, kind: HookEventKind, handler: Arc<dyn HookHandler>, timeout: Duration) {
        let name = name.into();
        if let Ok(mut regs) = self.registrations.write() {
            regs.push(Registration { name, kind, handler, timeout });
        }
    }

    pub fn len(&self) -> usize {
        self.registrations.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatches `event` to every handler registered for its kind, in
    /// registration order, stopping early on `Block`/`Cancel`.
    ///
    /// Error policy: a handler exception (here, a timeout — Rust hook
    /// handlers don't panic across the await boundary the way a JS hook
    /// might throw) is logged and treated as `Continue`, *except* for
    /// `tool_call`, which fails closed into `Block`.
    pub async fn dispatch(&self, event: &HookEvent, ctx: &HookContext, api: &HookApi) -> Vec<HookOutcome> {
        let matching: Vec<(String, Arc<dyn HookHandler>, Duration)> = self
            .registrations
            .read()
            .map(|regs| regs.iter().filter(|r| r.kind == event.kind()).map(|r| (r.name.clone(), r.handler.clone(), r.timeout)).collect())
            .unwrap_or_default();

        let mut outcomes = Vec::with_capacity(matching.len());
        for (name, handler, timeout) in matching {
            let start = Instant::now();
            let outcome = match tokio::time::timeout(timeout, handler.handle(event, ctx, api)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(hook_name = %name, "hook timed out");
                    if event.fails_closed() {
                        HookResult::Block { reason: format!("hook {name} timed out") }
                    } else {
                        HookResult::Continue
                    }
                }
            };
            let duration_ms = start.elapsed().as_millis() as i64;
            debug!(hook_name = %name, duration_ms, "hook executed");
            let short_circuit = outcome.is_block() || outcome.is_cancel();
            outcomes.push(HookOutcome { hook_name: name, result: outcome, duration_ms });
            if short_circuit {
                break;
            }
        }
        outcomes
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
