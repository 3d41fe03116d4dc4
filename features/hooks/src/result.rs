//! Hook result types.
//!
//! After a hook handler runs it produces a `HookResult` that tells the
//! dispatcher (and, through it, the agent loop) how to proceed.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The outcome of a single hook handler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HookResult {
    /// Continue normal execution; the handler did not intervene.
    Continue,

    /// Short-circuits remaining handlers. For `tool_call` this also
    /// instructs the scheduler not to execute the tool.
    Block { reason: String },

    /// Aborts the surrounding control flow (session switch, compaction,
    /// branch, new session). The caller reports the cancellation.
    Cancel,

    /// Replaces the tool call's input before it runs (`tool_call` only).
    ReplaceInput { new_input: Value },

    /// Replaces a tool result's content after it ran (`tool_result` only).
    ReplaceToolResult {
        content: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
        is_error: bool,
    },

    /// Injects additional context before `convertToLlm` runs (`context`
    /// only). Non-destructive: the session itself is unchanged.
    InjectContext { messages: Value },

    /// Overrides the default compaction outcome
    /// (`session_before_compact` only); the returned value is persisted
    /// in place of the compactor's own result.
    OverrideCompaction { compaction: Value },
}

impl HookResult {
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block { .. })
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// A completed hook execution with timing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookOutcome {
    pub hook_name: String,
    pub result: HookResult,
    pub duration_ms: i64,
}

#[cfg(test)]
#[path = "result.test.rs"]
mod tests;
