use super::*;

#[test]
fn record_accumulates_per_category() {
    let mut budget = ContextBudget::default();
    budget.record(BudgetCategory::ConversationText, 100);
    budget.record(BudgetCategory::ConversationText, 50);
    budget.record(BudgetCategory::Images, 1_200);
    assert_eq!(budget.conversation_text, 150);
    assert_eq!(budget.images, 1_200);
    assert_eq!(budget.total(), 1_350);
}
