use std::io::Write;
use std::path::PathBuf;

use cocode_protocol::ToolResultContent;
use cocode_tools_api::Tool;
use tempfile::NamedTempFile;

use super::*;

fn make_context() -> ToolContext {
    ToolContext::new("call-1", "session-1", PathBuf::from("/tmp"))
}

#[tokio::test]
async fn reads_whole_file_with_line_numbers() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "alpha").unwrap();
    writeln!(file, "beta").unwrap();

    let tool = ReadTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file.path().to_str().unwrap()});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert!(text.contains("1\talpha"));
    assert!(text.contains("2\tbeta"));
}

#[tokio::test]
async fn offset_and_limit_window_the_output() {
    let mut file = NamedTempFile::new().unwrap();
    for i in 1..=10 {
        writeln!(file, "line-{i}").unwrap();
    }

    let tool = ReadTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file.path().to_str().unwrap(), "offset": 3, "limit": 2});
    let output = tool.execute(input, &mut ctx).await.unwrap();
    let ToolResultContent::Text(text) = output.content else { panic!("expected text") };
    assert!(text.contains("3\tline-3"));
    assert!(text.contains("4\tline-4"));
    assert!(!text.contains("2\tline-2"));
    assert!(!text.contains("5\tline-5"));
}

#[tokio::test]
async fn nonexistent_file_is_an_io_error() {
    let tool = ReadTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": "/nonexistent/file.txt"});
    let err = tool.execute(input, &mut ctx).await.unwrap_err();
    assert!(matches!(err, cocode_tools_api::ToolError::Io { .. }));
}

#[tokio::test]
async fn reading_records_the_file_as_read_for_the_tracker() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "hi").unwrap();

    let tool = ReadTool::new();
    let mut ctx = make_context();
    let input = serde_json::json!({"file_path": file.path().to_str().unwrap()});
    tool.execute(input, &mut ctx).await.unwrap();
    let path = file.path().to_path_buf();
    assert!(ctx.file_tracker.lock().await.was_read(&path));
}
