//! Token estimation: chars/4, plus a flat per-image
//! constant since providers don't report image token cost up front.

use cocode_protocol::ContentBlock;
use cocode_protocol::EntryPayload;
use cocode_protocol::SessionEntry;
use cocode_protocol::ToolResultContent;

use crate::budget::BudgetCategory;
use crate::budget::ContextBudget;

const CHARS_PER_TOKEN: f64 = 4.0;

/// Estimate a raw string's token count.
pub fn estimate_text_tokens(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }
    (text.len() as f64 / CHARS_PER_TOKEN).ceil() as i64
}

/// Estimate the token footprint of one entry, given the per-image cost the
/// host's `CompactConfig` specifies.
pub fn estimate_entry_tokens(entry: &SessionEntry, image_token_estimate: i64) -> ContextBudget {
    let mut budget = ContextBudget::default();
    match &entry.payload {
        EntryPayload::User(msg) => accumulate_blocks(&mut budget, &msg.content, image_token_estimate),
        EntryPayload::Assistant(msg) => {
            accumulate_blocks(&mut budget, &msg.content, image_token_estimate)
        }
        EntryPayload::ToolResult(msg) => {
            budget.record(BudgetCategory::ConversationText, estimate_tool_result(&msg.content, image_token_estimate));
        }
        EntryPayload::BashExecution(msg) => {
            let tokens = estimate_text_tokens(&msg.command) + estimate_text_tokens(&msg.output);
            budget.record(BudgetCategory::ConversationText, tokens);
        }
        EntryPayload::CustomMessage(msg) => {
            let tokens = match &msg.content {
                cocode_protocol::CustomContent::Text(t) => estimate_text_tokens(t),
                cocode_protocol::CustomContent::Blocks(blocks) => {
                    accumulate_blocks(&mut budget, blocks, image_token_estimate);
                    0
                }
            };
            budget.record(BudgetCategory::ConversationText, tokens);
        }
        EntryPayload::Compaction(entry) => {
            budget.record(BudgetCategory::ConversationText, estimate_text_tokens(&entry.summary));
        }
        EntryPayload::BranchSummary(entry) => {
            budget.record(BudgetCategory::ConversationText, estimate_text_tokens(&entry.summary));
        }
        EntryPayload::ThinkingLevelChange(_)
        | EntryPayload::ModelChange(_)
        | EntryPayload::Label(_)
        | EntryPayload::Header(_)
        | EntryPayload::Custom(_) => {}
    }
    budget
}

fn accumulate_blocks(budget: &mut ContextBudget, blocks: &[ContentBlock], image_token_estimate: i64) {
    for block in blocks {
        match block {
            ContentBlock::Text { text } | ContentBlock::Thinking { text } => {
                budget.record(BudgetCategory::ConversationText, estimate_text_tokens(text));
            }
            ContentBlock::Image { .. } => {
                budget.record(BudgetCategory::Images, image_token_estimate);
            }
            ContentBlock::ToolCall(tool_call) => {
                budget.record(
                    BudgetCategory::ConversationText,
                    estimate_text_tokens(&tool_call.arguments.to_string()),
                );
            }
            ContentBlock::ToolResult(tool_result) => {
                budget.record(
                    BudgetCategory::ConversationText,
                    estimate_tool_result(&tool_result.content, image_token_estimate),
                );
            }
        }
    }
}

fn estimate_tool_result(content: &ToolResultContent, image_token_estimate: i64) -> i64 {
    match content {
        ToolResultContent::Text(t) => estimate_text_tokens(t),
        ToolResultContent::Structured(v) => estimate_text_tokens(&v.to_string()),
        ToolResultContent::Blocks(blocks) => {
            let mut budget = ContextBudget::default();
            accumulate_blocks(&mut budget, blocks, image_token_estimate);
            budget.total()
        }
    }
}

/// Sum of [`estimate_entry_tokens`] across a branch, plus `reserve_tokens`
/// recorded as its own category so callers can see the full picture.
pub fn estimate_branch_tokens(entries: &[SessionEntry], image_token_estimate: i64, reserve_tokens: i64) -> ContextBudget {
    let mut total = ContextBudget::default();
    for entry in entries {
        let per_entry = estimate_entry_tokens(entry, image_token_estimate);
        total.conversation_text += per_entry.conversation_text;
        total.images += per_entry.images;
    }
    total.record(BudgetCategory::Reserved, reserve_tokens);
    total
}

#[cfg(test)]
#[path = "calculator.test.rs"]
mod tests;
