use std::path::PathBuf;

use cocode_tools_api::Tool;
use tempfile::TempDir;

use super::*;

fn make_context() -> ToolContext {
    ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"))
}

#[tokio::test]
async fn creating_a_file_requires_old_string_to_be_empty() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("new.txt");

    let tool = EditTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file_path.to_str().unwrap(), "old_string": "", "new_string": "fresh"});
    tool.execute(input, &mut ctx).await.unwrap();
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "fresh");
}

#[tokio::test]
async fn editing_requires_a_prior_read() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("existing.txt");
    std::fs::write(&file_path, "hello world").unwrap();

    let tool = EditTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file_path.to_str().unwrap(), "old_string": "world", "new_string": "rust"});
    let err = tool.execute(input, &mut ctx).await.unwrap_err();
    assert!(matches!(err, cocode_tools_api::ToolError::ExecutionFailed { .. }));
}

#[tokio::test]
async fn exact_match_replaces_first_occurrence() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("existing.txt");
    std::fs::write(&file_path, "hello world, hello moon").unwrap();

    let tool = EditTool::new();
    let mut ctx = make_context();
    ctx.record_file_read(&file_path).await;
    let input = serde_json::json!({"file_path": file_path.to_str().unwrap(), "old_string": "hello", "new_string": "hi"});
    tool.execute(input, &mut ctx).await.unwrap();
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "hi world, hello moon");
}

#[tokio::test]
async fn replace_all_replaces_every_occurrence() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("existing.txt");
    std::fs::write(&file_path, "hello world, hello moon").unwrap();

    let tool = EditTool::new();
    let mut ctx = make_context();
    ctx.record_file_read(&file_path).await;
    let input = serde_json::json!({
        "file_path": file_path.to_str().unwrap(),
        "old_string": "hello",
        "new_string": "hi",
        "replace_all": true
    });
    tool.execute(input, &mut ctx).await.unwrap();
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "hi world, hi moon");
}

#[tokio::test]
async fn whitespace_tolerant_match_survives_reformatting() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("existing.txt");
    std::fs::write(&file_path, "fn main()   {\n    println!(\"hi\");\n}\n").unwrap();

    let tool = EditTool::new();
    let mut ctx = make_context();
    ctx.record_file_read(&file_path).await;
    let input = serde_json::json!({
        "file_path": file_path.to_str().unwrap(),
        "old_string": "fn main() {\nprintln!(\"hi\");\n}",
        "new_string": "fn main() {}"
    });
    let output = tool.execute(input, &mut ctx).await.unwrap();
    assert!(!output.is_error);
}

#[tokio::test]
async fn missing_old_string_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("existing.txt");
    std::fs::write(&file_path, "hello world").unwrap();

    let tool = EditTool::new();
    let mut ctx = make_context();
    ctx.record_file_read(&file_path).await;
    let input = serde_json::json!({"file_path": file_path.to_str().unwrap(), "old_string": "nope", "new_string": "x"});
    assert!(tool.execute(input, &mut ctx).await.is_err());
}
