//! Micro-compaction: drop old tool-result bodies from the view sent to the
//! provider without calling an LLM or touching the persisted log. Cheaper
//! and faster than full summarization; runs first and may make full
//! compaction unnecessary.

use cocode_protocol::EntryPayload;
use cocode_protocol::SessionEntry;
use cocode_protocol::ToolResultContent;
use cocode_protocol::ToolResultMessage;

const PLACEHOLDER: &str = "[output omitted by micro-compaction]";

/// Replace the content of every `ToolResult` entry except the
/// `keep_recent` most recent ones with a placeholder. Operates on a clone
/// of the view — never mutates the caller's entries or the session log.
pub fn micro_compact_view(entries: &[SessionEntry], keep_recent: usize) -> Vec<SessionEntry> {
    let tool_result_positions: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e.payload, EntryPayload::ToolResult(_)))
        .map(|(i, _)| i)
        .collect();

    let cutoff = tool_result_positions.len().saturating_sub(keep_recent);
    let truncate_positions: std::collections::HashSet<usize> =
        tool_result_positions[..cutoff].iter().copied().collect();

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if truncate_positions.contains(&i) {
                let mut truncated = entry.clone();
                if let EntryPayload::ToolResult(ToolResultMessage { is_error, tool_call_id, .. }) =
                    &truncated.payload
                {
                    truncated.payload = EntryPayload::ToolResult(ToolResultMessage {
                        tool_call_id: tool_call_id.clone(),
                        content: ToolResultContent::Text(PLACEHOLDER.to_string()),
                        is_error: *is_error,
                        details: None,
                    });
                }
                truncated
            } else {
                entry.clone()
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "micro.test.rs"]
mod tests;
