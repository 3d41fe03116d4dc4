use std::path::PathBuf;

use cocode_protocol::ToolResultContent;
use cocode_tools_api::Tool;

use super::*;

fn make_context() -> ToolContext {
    ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"))
}

#[tokio::test]
async fn runs_a_command_and_captures_stdout() {
    let tool = BashTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"command": "echo hello"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert!(text.contains("hello"));
    assert!(!output.is_error);
}

#[tokio::test]
async fn nonzero_exit_is_reported_as_an_error_result() {
    let tool = BashTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"command": "exit 7"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    assert!(output.is_error);
}

#[tokio::test]
async fn timeout_is_enforced() {
    let tool = BashTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"command": "sleep 5", "timeout_secs": 1});
    let err = tool.execute(input, &mut ctx).await.unwrap_err();
    assert!(matches!(err, cocode_tools_api::ToolError::Timeout { .. }));
}

#[test]
fn bash_is_not_concurrency_safe() {
    assert!(!BashTool::new().is_concurrent_safe());
}

#[test]
fn read_only_heuristic_allows_simple_inspection_commands() {
    assert!(is_read_only_command("git status"));
    assert!(is_read_only_command("ls -la"));
    assert!(!is_read_only_command("rm -rf /"));
    assert!(!is_read_only_command("echo hi > file.txt"));
}

#[test]
fn is_concurrency_safe_for_defers_to_the_read_only_heuristic() {
    let tool = BashTool::new();
    assert!(tool.is_concurrency_safe_for(&serde_json::json!({"command": "git status"})));
    assert!(!tool.is_concurrency_safe_for(&serde_json::json!({"command": "rm -rf /"})));
    assert!(!tool.is_concurrency_safe_for(&serde_json::json!({})));
}
