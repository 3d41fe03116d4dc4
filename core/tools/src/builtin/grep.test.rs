use std::path::PathBuf;

use cocode_protocol::ToolResultContent;
use cocode_tools_api::Tool;
use tempfile::TempDir;

use super::*;

fn make_context(cwd: PathBuf) -> ToolContext {
    ToolContext::new("call-1", "session-1", cwd)
}

#[tokio::test]
async fn files_with_matches_lists_matching_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.txt"), "hello world").unwrap();
    std::fs::write(dir.path().join("b.txt"), "nothing here").unwrap();

    let tool = GrepTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "hello"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert!(text.contains("a.txt"));
    assert!(!text.contains("b.txt"));
}

#[tokio::test]
async fn content_mode_includes_line_numbers() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.txt"), "first\nsecond hello\nthird").unwrap();

    let tool = GrepTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "hello", "output_mode": "content"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert!(text.contains("2:second hello"));
}

#[tokio::test]
async fn no_matches_reports_clearly() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.txt"), "nothing to see").unwrap();

    let tool = GrepTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "zzzz-not-present"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert_eq!(text, "no matches");
}

#[tokio::test]
async fn invalid_regex_is_rejected() {
    let dir = TempDir::new().unwrap();
    let tool = GrepTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "("});
    assert!(tool.execute(input, &mut ctx).await.is_err());
}
