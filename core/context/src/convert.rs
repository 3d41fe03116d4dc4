//! `buildSessionContext` and `convertToLlm`.

use cocode_protocol::ContentBlock;
use cocode_protocol::CustomContent;
use cocode_protocol::EntryPayload;
use cocode_protocol::SessionEntry;
use serde::Deserialize;
use serde::Serialize;

/// One message as a provider sees it. Distinct from [`SessionEntry`]:
/// several entry kinds collapse into a single synthetic `User` message here
/// (bash execution, custom messages, compaction/branch summaries).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LlmRole {
    User,
    Assistant,
    Tool,
}

impl LlmMessage {
    fn text(role: LlmRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }
}

/// Slice a branch down to the entries still "in view" after the most
/// recent compaction boundary. The view is the
/// compaction entry itself — it stands in for everything it summarized —
/// followed by every entry from `firstKeptEntryId` onward. Entries between
/// the compaction entry and `firstKeptEntryId` were folded into the
/// summary and are never shown to the provider again.
pub fn build_session_context(branch: &[SessionEntry]) -> Vec<SessionEntry> {
    let Some(compaction_idx) = branch.iter().rposition(|e| matches!(e.payload, EntryPayload::Compaction(_))) else {
        return branch.to_vec();
    };

    let EntryPayload::Compaction(compaction) = &branch[compaction_idx].payload else {
        unreachable!("rposition matched a Compaction payload");
    };
    let first_kept_idx = branch
        .iter()
        .position(|e| e.id == compaction.first_kept_entry_id)
        .filter(|&idx| idx > compaction_idx);

    let mut view = vec![branch[compaction_idx].clone()];
    match first_kept_idx {
        Some(idx) => view.extend(branch[idx..].iter().cloned()),
        None => view.extend(branch[compaction_idx + 1..].iter().cloned()),
    }
    view
}

/// Expand a (possibly already compaction-sliced) branch into the flat
/// message list a provider call actually sends. Pure function: calling it
/// twice on the same input yields identical output.
pub fn convert_to_llm(entries: &[SessionEntry]) -> Vec<LlmMessage> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        match &entry.payload {
            EntryPayload::Header(_) | EntryPayload::Custom(_) => {}
            EntryPayload::User(msg) => out.push(LlmMessage { role: LlmRole::User, content: msg.content.clone() }),
            EntryPayload::Assistant(msg) => {
                out.push(LlmMessage { role: LlmRole::Assistant, content: msg.content.clone() })
            }
            EntryPayload::ToolResult(msg) => out.push(LlmMessage {
                role: LlmRole::Tool,
                content: vec![ContentBlock::ToolResult(cocode_protocol::ToolResultRef {
                    tool_call_id: msg.tool_call_id.clone(),
                    content: msg.content.clone(),
                    is_error: msg.is_error,
                })],
            }),
            EntryPayload::BashExecution(msg) => {
                let text = format!("$ {}\n{}", msg.command, msg.output);
                out.push(LlmMessage::text(LlmRole::User, text));
            }
            EntryPayload::CustomMessage(msg) => {
                let content = match &msg.content {
                    CustomContent::Text(t) => vec![ContentBlock::Text { text: t.clone() }],
                    CustomContent::Blocks(blocks) => blocks.clone(),
                };
                out.push(LlmMessage { role: LlmRole::User, content });
            }
            EntryPayload::Compaction(entry) => {
                out.push(LlmMessage::text(LlmRole::User, format!("[compacted context]\n{}", entry.summary)));
            }
            EntryPayload::BranchSummary(entry) => {
                out.push(LlmMessage::text(LlmRole::User, format!("[branch summary]\n{}", entry.summary)));
            }
            EntryPayload::ThinkingLevelChange(_) | EntryPayload::ModelChange(_) | EntryPayload::Label(_) => {}
        }
    }
    out
}

#[cfg(test)]
#[path = "convert.test.rs"]
mod tests;
