use std::path::PathBuf;

use cocode_tools_api::Tool;
use tempfile::TempDir;

use super::*;

fn make_context() -> ToolContext {
    ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"))
}

#[tokio::test]
async fn writes_a_new_file() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("out.txt");

    let tool = WriteTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file_path.to_str().unwrap(), "content": "hello"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    assert!(!output.is_error);
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "hello");
}

#[tokio::test]
async fn creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("a").join("b").join("out.txt");

    let tool = WriteTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file_path.to_str().unwrap(), "content": "nested"});
    tool.execute(input, &mut ctx).await.unwrap();
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "nested");
}

#[tokio::test]
async fn overwrites_existing_content() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("out.txt");
    std::fs::write(&file_path, "old").unwrap();

    let tool = WriteTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file_path.to_str().unwrap(), "content": "new"});
    tool.execute(input, &mut ctx).await.unwrap();
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "new");
}

#[test]
fn write_is_not_concurrency_safe() {
    assert!(!WriteTool::new().is_concurrent_safe());
}
