use super::*;

#[test]
fn block_reports_is_block() {
    let result = HookResult::Block { reason: "nope".to_string() };
    assert!(result.is_block());
    assert!(!result.is_cancel());
}

#[test]
fn continue_is_neither_block_nor_cancel() {
    assert!(!HookResult::Continue.is_block());
    assert!(!HookResult::Continue.is_cancel());
}

#[test]
fn cancel_reports_is_cancel() {
    assert!(HookResult::Cancel.is_cancel());
}

#[test]
fn serializes_with_tagged_action_field() {
    let result = HookResult::ReplaceToolResult { content: serde_json::json!("ok"), details: None, is_error: false };
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["action"], "replace_tool_result");
    assert_eq!(value["content"], "ok");
    assert!(value.get("details").is_none());
}
