//! Find tool: locates files under a directory whose path matches a glob,
//! respecting `.gitignore`, sorted by most-recently-modified first.

use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::ToolOutput;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolError;
use ignore::WalkBuilder;
use serde_json::Value;

const DEFAULT_MAX_RESULTS: usize = 200;

pub struct FindTool {
    max_results: usize,
}

impl FindTool {
    pub fn new() -> Self {
        Self { max_results: DEFAULT_MAX_RESULTS }
    }
}

impl Default for FindTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl cocode_tools_api::Tool for FindTool {
    fn name(&self) -> &str {
        "Find"
    }

    fn description(&self) -> &str {
        "Finds files under a directory whose path matches a glob pattern"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {"type": "string", "description": "Glob pattern, e.g. \"**/*.rs\""},
                "path": {"type": "string", "description": "Directory to search (default: cwd)"}
            },
            "required": ["pattern"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        let pattern = input["pattern"].as_str().ok_or_else(|| ToolError::invalid_input("pattern must be a string"))?.to_string();
        let search_path = ctx.resolve_path(input["path"].as_str().unwrap_or("."));
        let max_results = self.max_results;

        let matcher = globset::Glob::new(&pattern)
            .map_err(|e| ToolError::invalid_input(format!("invalid glob: {e}")))?
            .compile_matcher();

        let result = tokio::task::spawn_blocking(move || find_matches(&search_path, &matcher, max_results))
            .await
            .map_err(|e| ToolError::internal(e.to_string()))?;

        if result.is_empty() {
            return Ok(ToolOutput::text("no matches"));
        }
        Ok(ToolOutput::text(result.join("\n")))
    }
}

fn find_matches(search_path: &PathBuf, matcher: &globset::GlobMatcher, max_results: usize) -> Vec<String> {
    let mut found: Vec<(SystemTime, String)> = Vec::new();
    for entry in WalkBuilder::new(search_path).hidden(false).build() {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(search_path).unwrap_or(path);
        if !matcher.is_match(relative) {
            continue;
        }
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok()).unwrap_or(SystemTime::UNIX_EPOCH);
        found.push((modified, path.display().to_string()));
    }
    found.sort_by(|a, b| b.0.cmp(&a.0));
    found.truncate(max_results);
    found.into_iter().map(|(_, path)| path).collect()
}

#[cfg(test)]
#[path = "find.test.rs"]
mod tests;
