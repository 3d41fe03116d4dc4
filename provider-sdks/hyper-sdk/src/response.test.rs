use super::*;

#[test]
fn text_concatenates_text_blocks_only() {
    let response = GenerateResponse::new("resp_1", "test-model").with_content(vec![
        ContentBlock::Text { text: "hello ".into() },
        ContentBlock::Thinking { text: "ignored".into() },
        ContentBlock::Text { text: "world".into() },
    ]);
    assert_eq!(response.text(), "hello world");
}

#[test]
fn tool_calls_extracted_in_order() {
    let response = GenerateResponse::new("resp_1", "test-model")
        .with_content(vec![
            ContentBlock::ToolCall(ToolCall::new("call_1", "read_file", serde_json::json!({}))),
            ContentBlock::ToolCall(ToolCall::new("call_2", "grep", serde_json::json!({}))),
        ])
        .with_stop_reason(StopReason::ToolUse);
    let calls = response.tool_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].id, "call_1");
    assert!(response.has_tool_calls());
    assert!(response.stopped_for_tool_calls());
}

#[test]
fn has_thinking_detects_thinking_blocks() {
    let response =
        GenerateResponse::new("resp_1", "test-model").with_content(vec![ContentBlock::Thinking { text: "hm".into() }]);
    assert!(response.has_thinking());
    assert_eq!(response.thinking(), Some("hm"));
}
