//! Edit tool: exact string replacement in an existing file, or file
//! creation when `old_string` is empty.
//!
//! Tries an exact match first, then falls back to a whitespace-collapsed
//! match so edits survive reformatting-only drift between when a file was
//! read and when it is edited.

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::ToolOutput;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolError;
use serde_json::Value;
use tokio::fs;

pub struct EditTool;

impl EditTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EditTool {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Finds `old` in `haystack`, first exactly then by whitespace-collapsed
/// comparison over a sliding window of lines. Returns the byte range to
/// replace.
fn locate(haystack: &str, old: &str) -> Option<std::ops::Range<usize>> {
    if let Some(start) = haystack.find(old) {
        return Some(start..start + old.len());
    }

    let target = collapse_whitespace(old);
    let old_line_count = old.lines().count().max(1);
    let lines: Vec<&str> = haystack.lines().collect();
    let mut offset = 0usize;
    let mut line_offsets = Vec::with_capacity(lines.len());
    for line in &lines {
        line_offsets.push(offset);
        offset += line.len() + 1;
    }

    for start_line in 0..lines.len() {
        let end_line = (start_line + old_line_count).min(lines.len());
        if end_line <= start_line {
            continue;
        }
        let window = lines[start_line..end_line].join("\n");
        if collapse_whitespace(&window) == target {
            let start = line_offsets[start_line];
            let end = start + window.len();
            return Some(start..end);
        }
    }
    None
}

#[async_trait]
impl cocode_tools_api::Tool for EditTool {
    fn name(&self) -> &str {
        "Edit"
    }

    fn description(&self) -> &str {
        "Replaces an exact (or whitespace-tolerant) string match in a file"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to modify"
                },
                "old_string": {
                    "type": "string",
                    "description": "The text to replace. An empty string creates a new file."
                },
                "new_string": {
                    "type": "string",
                    "description": "The text to replace it with"
                },
                "replace_all": {
                    "type": "boolean",
                    "description": "Replace every occurrence instead of only the first",
                    "default": false
                }
            },
            "required": ["file_path", "old_string", "new_string"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        let file_path = input["file_path"].as_str().ok_or_else(|| ToolError::invalid_input("file_path must be a string"))?;
        let old_string = input["old_string"].as_str().ok_or_else(|| ToolError::invalid_input("old_string must be a string"))?;
        let new_string = input["new_string"].as_str().ok_or_else(|| ToolError::invalid_input("new_string must be a string"))?;
        let replace_all = input["replace_all"].as_bool().unwrap_or(false);
        let path = ctx.resolve_path(file_path);

        if old_string.is_empty() {
            if path.exists() {
                return Err(ToolError::execution_failed(format!(
                    "cannot create {}: file already exists",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).await.map_err(ToolError::from)?;
            }
            fs::write(&path, new_string).await.map_err(ToolError::from)?;
            ctx.record_file_modified(&path).await;
            return Ok(ToolOutput::text(format!("created {}", path.display())));
        }

        if !ctx.file_tracker.lock().await.was_read(&path) {
            return Err(ToolError::execution_failed(format!(
                "{} must be read before it is edited",
                path.display()
            )));
        }

        let original = fs::read_to_string(&path).await.map_err(ToolError::from)?;
        let mut replaced = 0usize;
        let updated = if replace_all {
            let mut buf = original;
            while let Some(range) = locate(&buf, old_string) {
                buf.replace_range(range, new_string);
                replaced += 1;
            }
            buf
        } else {
            match locate(&original, old_string) {
                Some(range) => {
                    let mut buf = original;
                    buf.replace_range(range, new_string);
                    replaced = 1;
                    buf
                }
                None => {
                    return Err(ToolError::execution_failed(format!(
                        "old_string not found in {}",
                        path.display()
                    )));
                }
            }
        };

        if replaced == 0 {
            return Err(ToolError::execution_failed(format!("old_string not found in {}", path.display())));
        }

        fs::write(&path, &updated).await.map_err(ToolError::from)?;
        ctx.record_file_modified(&path).await;
        Ok(ToolOutput::text(format!("replaced {replaced} occurrence(s) in {}", path.display())))
    }
}

#[cfg(test)]
#[path = "edit.test.rs"]
mod tests;
