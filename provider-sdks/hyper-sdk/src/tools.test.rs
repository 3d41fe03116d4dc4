use super::*;

#[test]
fn new_has_no_description_or_custom_format() {
    let def = ToolDefinition::new("read_file", serde_json::json!({"type": "object"}));
    assert_eq!(def.name, "read_file");
    assert!(def.description.is_none());
    assert!(def.custom_format.is_none());
}

#[test]
fn full_sets_description() {
    let def = ToolDefinition::full("grep", "search text", serde_json::json!({}));
    assert_eq!(def.description.as_deref(), Some("search text"));
}

#[test]
fn custom_sets_format_and_null_parameters() {
    let def = ToolDefinition::custom("shell", "run a command", serde_json::json!({"grammar": "bash"}));
    assert_eq!(def.parameters, serde_json::Value::Null);
    assert!(def.custom_format.is_some());
}

#[test]
fn tool_choice_defaults_to_auto() {
    assert!(matches!(ToolChoice::default(), ToolChoice::Auto));
}
