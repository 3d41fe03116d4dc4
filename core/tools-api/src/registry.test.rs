use std::path::PathBuf;

use async_trait::async_trait;
use cocode_protocol::ToolOutput;
use cocode_protocol::ToolResultContent;

use super::*;
use crate::context::ToolContext;
use crate::error::Result;

struct TestTool {
    name: String,
}

#[async_trait]
impl Tool for TestTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "test tool"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: serde_json::Value, _ctx: &mut ToolContext) -> Result<ToolOutput> {
        Ok(ToolOutput { content: ToolResultContent::Text("ok".to_string()), is_error: false, modifiers: Vec::new() })
    }
}

#[test]
fn register_and_get_round_trip() {
    let mut registry = ToolRegistry::new();
    registry.register(TestTool { name: "test".to_string() });
    assert!(registry.has("test"));
    assert!(registry.get("test").is_some());
    assert!(registry.get("nonexistent").is_none());
}

#[test]
fn alias_resolves_to_the_same_tool() {
    let mut registry = ToolRegistry::new();
    registry.register_with_alias(TestTool { name: "read_file".to_string() }, "Read");
    assert!(registry.has("read_file"));
    assert!(registry.has("Read"));
    assert!(registry.get("Read").is_some());
}

#[test]
fn tool_names_are_sorted() {
    let mut registry = ToolRegistry::new();
    registry.register(TestTool { name: "beta".to_string() });
    registry.register(TestTool { name: "alpha".to_string() });
    assert_eq!(registry.tool_names(), vec!["alpha", "beta"]);
}

#[test]
fn all_definitions_covers_every_registered_tool() {
    let mut registry = ToolRegistry::new();
    registry.register(TestTool { name: "tool1".to_string() });
    registry.register(TestTool { name: "tool2".to_string() });
    assert_eq!(registry.all_definitions().len(), 2);
}

#[tokio::test]
async fn registered_tool_executes_through_the_returned_handle() {
    let mut registry = ToolRegistry::new();
    registry.register(TestTool { name: "test".to_string() });
    let tool = registry.get("test").unwrap();
    let mut ctx = ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"));
    let output = tool.execute(serde_json::json!({}), &mut ctx).await.unwrap();
    assert_eq!(output.content, ToolResultContent::Text("ok".to_string()));
}
