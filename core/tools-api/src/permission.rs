//! How aggressively the executor asks before running a tool that mutates
//! state.

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMode {
    /// Reads run unasked; writes/unsafe tools ask once per session per tool.
    #[default]
    Default,
    /// Writes and edits are pre-approved; everything else still asks.
    AcceptEdits,
    /// Nothing is asked; every tool is allowed to run.
    Bypass,
    /// No mutating tool is allowed to run; used for read-only exploration.
    Plan,
    /// Asking is suppressed entirely but unsafe tools are NOT pre-approved —
    /// they are denied outright rather than prompting.
    DontAsk,
}

impl PermissionMode {
    /// Whether a tool declaring [`cocode_protocol::ConcurrencySafety::Unsafe`]
    /// may run without an explicit allow from `Tool::check_permission`.
    pub fn pre_approves_unsafe(&self) -> bool {
        matches!(self, Self::Bypass | Self::AcceptEdits)
    }

    pub fn denies_everything_unsafe(&self) -> bool {
        matches!(self, Self::Plan | Self::DontAsk)
    }
}

#[cfg(test)]
#[path = "permission.test.rs"]
mod tests;
