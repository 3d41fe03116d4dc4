use std::path::PathBuf;

use cocode_protocol::ToolResultContent;

use super::*;

struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "echoes its message argument back"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {"message": {"type": "string"}},
            "required": ["message"],
        })
    }

    async fn execute(&self, input: Value, _ctx: &mut ToolContext) -> Result<ToolOutput, ToolError> {
        let message = input["message"].as_str().ok_or_else(|| crate::error::tool_error::InvalidInputSnafu {
            message: "message must be a string".to_string(),
        }.build())?;
        Ok(ToolOutput::text(format!("echo: {message}")))
    }
}

#[tokio::test]
async fn concurrency_safety_defaults_to_safe() {
    let tool = EchoTool;
    assert!(tool.is_concurrent_safe());
    assert!(tool.is_concurrency_safe_for(&serde_json::json!({"message": "hi"})));
}

#[tokio::test]
async fn validate_rejects_missing_required_field() {
    let tool = EchoTool;
    let invalid = serde_json::json!({});
    assert!(matches!(tool.validate(&invalid).await, ValidationResult::Invalid { .. }));

    let valid = serde_json::json!({"message": "hi"});
    assert!(matches!(tool.validate(&valid).await, ValidationResult::Valid));
}

#[tokio::test]
async fn execute_runs_and_post_process_defaults_to_identity() {
    let tool = EchoTool;
    let mut ctx = ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"));
    let output = tool.execute(serde_json::json!({"message": "hi"}), &mut ctx).await.unwrap();
    let output = tool.post_process(output, &ctx).await;
    assert_eq!(output.content, ToolResultContent::Text("echo: hi".to_string()));
}

#[test]
fn to_definition_carries_name_and_description() {
    let tool = EchoTool;
    let def = tool.to_definition();
    assert_eq!(def.name, "echo");
    assert_eq!(def.description.as_deref(), Some("echoes its message argument back"));
}
