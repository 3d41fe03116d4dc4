//! Read tool: returns a file's contents, optionally windowed by line
//! offset/limit, with each line prefixed by its 1-based number.

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::ToolOutput;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolError;
use serde_json::Value;
use tokio::fs;

const MAX_LINE_CHARS: usize = 2000;

pub struct ReadTool;

impl ReadTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl cocode_tools_api::Tool for ReadTool {
    fn name(&self) -> &str {
        "Read"
    }

    fn description(&self) -> &str {
        "Reads a file from the local filesystem, optionally windowed by offset/limit"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to read"
                },
                "offset": {
                    "type": "integer",
                    "description": "1-based line number to start reading from"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of lines to return"
                }
            },
            "required": ["file_path"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        let file_path = input["file_path"]
            .as_str()
            .ok_or_else(|| ToolError::invalid_input("file_path must be a string"))?;
        let path = ctx.resolve_path(file_path);

        let contents = fs::read_to_string(&path).await.map_err(ToolError::from)?;
        let offset = input["offset"].as_u64().unwrap_or(1).max(1) as usize;
        let limit = input["limit"].as_u64().map(|l| l as usize);

        let mut rendered = String::new();
        for (i, line) in contents.lines().enumerate() {
            let line_no = i + 1;
            if line_no < offset {
                continue;
            }
            if let Some(limit) = limit
                && line_no >= offset + limit
            {
                break;
            }
            let truncated = if line.len() > MAX_LINE_CHARS {
                let boundary = (0..=MAX_LINE_CHARS).rev().find(|&i| line.is_char_boundary(i)).unwrap_or(0);
                &line[..boundary]
            } else {
                line
            };
            rendered.push_str(&format!("{line_no}\t{truncated}\n"));
        }

        ctx.record_file_read(&path).await;

        if rendered.is_empty() {
            rendered = "(empty file)".to_string();
        }
        Ok(ToolOutput::text(rendered))
    }
}

#[cfg(test)]
#[path = "read.test.rs"]
mod tests;
