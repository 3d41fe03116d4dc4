//! Token budget breakdown for a built context.

use serde::Deserialize;
use serde::Serialize;

/// Categories the estimator breaks a context's token count into. Narrower
/// than a full prompt-builder budget — this crate only needs enough detail
/// to decide whether compaction should trigger and to report why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    ConversationText,
    Images,
    Reserved,
}

/// Token accounting for one `buildSessionContext` result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContextBudget {
    pub conversation_text: i64,
    pub images: i64,
    pub reserved: i64,
}

impl ContextBudget {
    pub fn record(&mut self, category: BudgetCategory, tokens: i64) {
        match category {
            BudgetCategory::ConversationText => self.conversation_text += tokens,
            BudgetCategory::Images => self.images += tokens,
            BudgetCategory::Reserved => self.reserved += tokens,
        }
    }

    pub fn total(&self) -> i64 {
        self.conversation_text + self.images + self.reserved
    }
}

#[cfg(test)]
#[path = "budget.test.rs"]
mod tests;
