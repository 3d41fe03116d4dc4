//! Top-level compaction orchestration.
//!
//! Ties together the cut-point search, the micro-compaction pre-step, and
//! split-turn summarization into a single call the loop can make once it
//! decides `CompactConfig::should_trigger` is true. A `session_before_compact`
//! hook gets a chance to cancel or override the run before any summarizer
//! call is made; this crate stays decoupled from `cocode-hooks` and just
//! takes the already-resolved decision as an argument.

use cocode_protocol::CompactionEntry;
use cocode_protocol::SessionEntry;

use crate::cutpoint::find_cut_index;
use crate::micro::micro_compact_view;
use crate::summarize::Summarizer;
use crate::summarize::split_turn_summarize;

/// What a `session_before_compact` hook decided, resolved by the caller
/// before invoking [`compact_branch`].
#[derive(Debug, Clone, PartialEq)]
pub enum HookDecision {
    /// No hook intervened, or every hook let the run proceed.
    Proceed,
    /// A hook vetoed compaction outright.
    Cancelled,
    /// A hook supplied its own [`CompactionEntry`], skipping the summarizer.
    Override(CompactionEntry),
}

/// Result of attempting compaction. A summarizer failure is NOT a hard
/// error — the loop proceeds uncompacted and surfaces a warning instead of
/// aborting the turn.
#[derive(Debug, Clone)]
pub enum Outcome {
    Entry(CompactionEntry),
    Cancelled,
    Failed(String),
}

/// Number of most-recent tool results micro-compaction leaves untouched
/// before the summarizer ever gets a window to work with.
const MICRO_COMPACT_KEEP_RECENT: usize = 4;

#[allow(clippy::too_many_arguments)]
pub async fn compact_branch(
    summarizer: &dyn Summarizer,
    branch: &[SessionEntry],
    keep_recent_tokens: i64,
    image_token_estimate: i64,
    summary_max_tokens: i64,
    tokens_before: i64,
    hook_decision: HookDecision,
) -> Outcome {
    match hook_decision {
        HookDecision::Cancelled => return Outcome::Cancelled,
        HookDecision::Override(entry) => return Outcome::Entry(entry),
        HookDecision::Proceed => {}
    }

    if branch.is_empty() {
        return Outcome::Failed("nothing to compact".to_string());
    }

    let cut_index = find_cut_index(branch, keep_recent_tokens, image_token_estimate);
    if cut_index == 0 {
        return Outcome::Failed("no entries old enough to summarize".to_string());
    }

    let dropped = micro_compact_view(&branch[..cut_index], MICRO_COMPACT_KEEP_RECENT);
    let first_kept_entry_id = branch[cut_index].id;

    match split_turn_summarize(summarizer, &dropped, summary_max_tokens).await {
        Ok(summary) => Outcome::Entry(CompactionEntry {
            summary,
            first_kept_entry_id,
            tokens_before,
            details: None,
        }),
        Err(err) => Outcome::Failed(err.to_string()),
    }
}

#[cfg(test)]
#[path = "compact.test.rs"]
mod tests;
