//! Write tool: creates or overwrites a file with the given content.

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::ToolOutput;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolError;
use serde_json::Value;
use tokio::fs;

pub struct WriteTool;

impl WriteTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WriteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl cocode_tools_api::Tool for WriteTool {
    fn name(&self) -> &str {
        "Write"
    }

    fn description(&self) -> &str {
        "Writes content to a file, creating it (and its parent directories) if needed"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        let file_path = input["file_path"].as_str().ok_or_else(|| ToolError::invalid_input("file_path must be a string"))?;
        let content = input["content"].as_str().ok_or_else(|| ToolError::invalid_input("content must be a string"))?;
        let path = ctx.resolve_path(file_path);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(ToolError::from)?;
        }
        fs::write(&path, content).await.map_err(ToolError::from)?;
        ctx.record_file_modified(&path).await;

        if ctx.should_flush() {
            tracing::debug!(path = %path.display(), "write flushed");
        }

        Ok(ToolOutput::text(format!("wrote {} bytes to {}", content.len(), path.display())))
    }
}

#[cfg(test)]
#[path = "write.test.rs"]
mod tests;
