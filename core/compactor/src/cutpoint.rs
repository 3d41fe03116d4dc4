//! Backward cut-point search: find where
//! the kept suffix of a branch should start, never landing on a
//! `ToolResult` and never splitting a control-entry run off from the turn
//! it annotates.

use cocode_context::estimate_entry_tokens;
use cocode_protocol::EntryPayload;
use cocode_protocol::SessionEntry;

/// True for entries that aren't independently meaningful cut points but
/// that should stay attached to whatever turn follows them.
fn is_control_entry(entry: &SessionEntry) -> bool {
    matches!(
        entry.payload,
        EntryPayload::ThinkingLevelChange(_) | EntryPayload::ModelChange(_) | EntryPayload::Label(_)
    )
}

/// Index into `branch` where the kept suffix should start, given a token
/// budget for "recent" content that must survive verbatim. Returns `0` if
/// the whole branch fits, or if no valid cut point exists short of the
/// start.
pub fn find_cut_index(branch: &[SessionEntry], keep_recent_tokens: i64, image_token_estimate: i64) -> usize {
    if branch.is_empty() {
        return 0;
    }

    let mut accumulated = 0i64;
    let mut candidate = branch.len();

    for (idx, entry) in branch.iter().enumerate().rev() {
        if accumulated >= keep_recent_tokens && entry.payload.is_valid_cut_point() {
            candidate = idx;
            break;
        }
        accumulated += estimate_entry_tokens(entry, image_token_estimate).total();
    }

    if candidate == branch.len() {
        // Never accumulated enough to stop, or no valid cut point found
        // scanning all the way back: keep everything.
        return 0;
    }

    // Control-entry backscan: pull any immediately preceding control
    // entries into the kept window so they stay with their turn.
    let mut start = candidate;
    while start > 0 && is_control_entry(&branch[start - 1]) {
        start -= 1;
    }
    start
}

#[cfg(test)]
#[path = "cutpoint.test.rs"]
mod tests;
