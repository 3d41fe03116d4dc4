use std::path::PathBuf;

use cocode_protocol::ToolResultContent;
use cocode_tools_api::Tool;
use tempfile::TempDir;

use super::*;

fn make_context(cwd: PathBuf) -> ToolContext {
    ToolContext::new("call-1", "session-1", cwd)
}

#[tokio::test]
async fn matches_files_by_glob() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.rs"), "").unwrap();
    std::fs::write(dir.path().join("b.txt"), "").unwrap();

    let tool = FindTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "*.rs"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert!(text.contains("a.rs"));
    assert!(!text.contains("b.txt"));
}

#[tokio::test]
async fn recursive_glob_reaches_subdirectories() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src").join("main.rs"), "").unwrap();

    let tool = FindTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "**/*.rs"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert!(text.contains("main.rs"));
}

#[tokio::test]
async fn no_matches_reports_clearly() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.txt"), "").unwrap();

    let tool = FindTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "*.zzz"});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert_eq!(text, "no matches");
}

#[tokio::test]
async fn invalid_glob_is_rejected() {
    let dir = TempDir::new().unwrap();
    let tool = FindTool::new();
    let mut ctx = make_context(dir.path().to_path_buf());
    let input = serde_json::json!({"pattern": "["});
    assert!(tool.execute(input, &mut ctx).await.is_err());
}
