//! The summarization call and split-turn join.

use async_trait::async_trait;
use cocode_protocol::EntryPayload;
use cocode_protocol::SessionEntry;

use crate::error::CompactError;
use crate::error::compact_error::EmptyWindowSnafu;
use crate::render::render_for_summary;

/// Provider-agnostic summarization boundary. `cocode-loop` wires this to
/// whatever `hyper-sdk` client the active session is using; tests use a
/// stub.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str, max_tokens: i64) -> Result<String, CompactError>;
}

/// Summarize the entries being dropped, split into two contiguous halves
/// so neither call exceeds a manageable prompt size and so the eventual
/// `firstKeptEntryId` boundary is easy to audit — the two summaries are
/// joined with `\n\n---\n\n`.
pub async fn split_turn_summarize(
    summarizer: &dyn Summarizer,
    dropped: &[SessionEntry],
    max_tokens: i64,
) -> Result<String, CompactError> {
    if dropped.is_empty() {
        return EmptyWindowSnafu.fail();
    }
    if dropped.len() == 1 {
        let prompt = render_for_summary(dropped);
        return summarizer.summarize(&prompt, max_tokens).await;
    }

    let split = turn_split_point(dropped);
    let (first_half, second_half) = dropped.split_at(split);
    let half_tokens = max_tokens / 2;

    let first_summary = summarizer.summarize(&render_for_summary(first_half), half_tokens).await?;
    let second_summary = summarizer.summarize(&render_for_summary(second_half), half_tokens).await?;

    Ok(format!("{first_summary}\n\n---\n\n{second_summary}"))
}

/// A split index near the midpoint that never lands mid-turn: scans
/// backward from the midpoint for the nearest turn start (a `User` entry)
/// and splits there, so the whole turn the midpoint happened to land in
/// moves entirely into the second half instead of being cut in two.
/// Falls back to the midpoint itself if no turn start is found short of
/// the window's own start (both halves would otherwise be degenerate).
fn turn_split_point(dropped: &[SessionEntry]) -> usize {
    let midpoint = dropped.len() / 2;
    let turn_start = dropped[..=midpoint]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, entry)| matches!(entry.payload, EntryPayload::User(_)))
        .map(|(idx, _)| idx);

    match turn_start {
        Some(0) | None => midpoint.max(1),
        Some(idx) => idx,
    }
}

#[cfg(test)]
#[path = "summarize.test.rs"]
mod tests;
