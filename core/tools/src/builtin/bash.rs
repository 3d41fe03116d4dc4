//! Bash tool: runs a shell command with a timeout, streaming output is
//! not replayed incrementally here — the full stdout/stderr is returned
//! once the process exits (or is killed on timeout/cancellation).

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::ToolOutput;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolError;
use serde_json::Value;
use tokio::process::Command;
use tokio::time::Duration;

const DEFAULT_TIMEOUT_SECS: i64 = 120;
const MAX_TIMEOUT_SECS: i64 = 600;

/// A short allow-list of read-only commands, run with no shell
/// metacharacters, are safe to run alongside other tools in the same batch.
pub fn is_read_only_command(command: &str) -> bool {
    let trimmed = command.trim();
    let is_simple = !trimmed.contains(['&', '|', ';', '>', '<']);
    if !is_simple {
        return false;
    }
    let first_word = trimmed.split_whitespace().next().unwrap_or("");
    match first_word {
        "git" => {
            let subcommand = trimmed.split_whitespace().nth(1).unwrap_or("");
            matches!(subcommand, "status" | "log" | "diff" | "show" | "branch" | "tag" | "remote" | "rev-parse")
        }
        _ => matches!(first_word, "ls" | "cat" | "head" | "tail" | "wc" | "pwd" | "echo" | "whoami" | "date" | "env"),
    }
}

pub struct BashTool;

impl BashTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BashTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl cocode_tools_api::Tool for BashTool {
    fn name(&self) -> &str {
        "Bash"
    }

    fn description(&self) -> &str {
        "Executes a shell command and returns its combined output"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {"type": "string", "description": "The command to execute"},
                "timeout_secs": {"type": "integer", "description": "Timeout in seconds (max 600)"}
            },
            "required": ["command"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn is_concurrency_safe_for(&self, input: &Value) -> bool {
        input["command"].as_str().map(is_read_only_command).unwrap_or(false)
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        let command = input["command"].as_str().ok_or_else(|| ToolError::invalid_input("command must be a string"))?;
        let timeout_secs = input["timeout_secs"].as_i64().unwrap_or(DEFAULT_TIMEOUT_SECS).clamp(1, MAX_TIMEOUT_SECS);

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&ctx.cwd)
            .kill_on_drop(true)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(ToolError::from)?;

        let wait = child.wait_with_output();
        let timeout = tokio::time::timeout(Duration::from_secs(timeout_secs as u64), wait);
        let output = tokio::select! {
            result = timeout => match result {
                Ok(Ok(output)) => output,
                Ok(Err(err)) => return Err(ToolError::from(err)),
                Err(_) => return Err(ToolError::timeout(timeout_secs)),
            },
            () = ctx.cancelled() => return Err(ToolError::cancelled()),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut text = stdout.to_string();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str("STDERR:\n");
            text.push_str(&stderr);
        }
        if text.is_empty() {
            text = "(no output)".to_string();
        }

        if !output.status.success() {
            text.push_str(&format!("\n\nexit code: {}", output.status.code().unwrap_or(-1)));
            return Ok(ToolOutput::error(text));
        }
        Ok(ToolOutput::text(text))
    }
}

#[cfg(test)]
#[path = "bash.test.rs"]
mod tests;
