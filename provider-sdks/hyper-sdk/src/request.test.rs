use cocode_context::LlmRole;
use cocode_protocol::ContentBlock;

use super::*;

fn user_message(text: &str) -> LlmMessage {
    LlmMessage {
        role: LlmRole::User,
        content: vec![ContentBlock::Text { text: text.into() }],
    }
}

#[test]
fn builder_methods_set_optional_fields() {
    let request = GenerateRequest::new(vec![user_message("hi")])
        .temperature(0.7)
        .max_tokens(1000)
        .top_p(0.9);
    assert_eq!(request.temperature, Some(0.7));
    assert_eq!(request.max_tokens, Some(1000));
    assert_eq!(request.top_p, Some(0.9));
}

#[test]
fn has_tools_is_false_when_empty_or_unset() {
    let request = GenerateRequest::default();
    assert!(!request.has_tools());
    let request = request.tools(vec![]);
    assert!(!request.has_tools());
}

#[test]
fn has_tools_is_true_once_populated() {
    let request = GenerateRequest::default()
        .tools(vec![ToolDefinition::new("read_file", serde_json::json!({}))]);
    assert!(request.has_tools());
}
