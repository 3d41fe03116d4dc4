//! Grep tool: regex content search over a directory tree, respecting
//! `.gitignore`, backed by the `grep` crate family (ripgrep's core
//! libraries) the way a real ripgrep wrapper would be built.

use std::path::PathBuf;

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::ToolOutput;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolError;
use grep_regex::RegexMatcherBuilder;
use grep_searcher::Searcher;
use grep_searcher::Sink;
use grep_searcher::SinkMatch;
use ignore::WalkBuilder;
use serde_json::Value;

const DEFAULT_MAX_RESULTS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Content,
    FilesWithMatches,
    Count,
}

impl OutputMode {
    fn parse(s: Option<&str>) -> Self {
        match s {
            Some("content") => Self::Content,
            Some("count") => Self::Count,
            _ => Self::FilesWithMatches,
        }
    }
}

struct MatchSink<'a> {
    lines: &'a mut Vec<(u64, String)>,
    limit: usize,
}

impl Sink for MatchSink<'_> {
    type Error = std::io::Error;

    fn matched(&mut self, _searcher: &Searcher, mat: &SinkMatch<'_>) -> Result<bool, std::io::Error> {
        if self.lines.len() >= self.limit {
            return Ok(false);
        }
        self.lines.push((mat.line_number().unwrap_or(0), String::from_utf8_lossy(mat.bytes()).trim_end().to_string()));
        Ok(true)
    }
}

pub struct GrepTool {
    max_results: usize,
}

impl GrepTool {
    pub fn new() -> Self {
        Self { max_results: DEFAULT_MAX_RESULTS }
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

impl Default for GrepTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl cocode_tools_api::Tool for GrepTool {
    fn name(&self) -> &str {
        "Grep"
    }

    fn description(&self) -> &str {
        "Searches file contents for a regular expression pattern"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {"type": "string", "description": "Regular expression to search for"},
                "path": {"type": "string", "description": "File or directory to search (default: cwd)"},
                "case_insensitive": {"type": "boolean", "default": false},
                "output_mode": {
                    "type": "string",
                    "enum": ["content", "files_with_matches", "count"],
                    "default": "files_with_matches"
                }
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
        let case_insensitive = input["case_insensitive"].as_bool().unwrap_or(false);
        let output_mode = OutputMode::parse(input["output_mode"].as_str());
        let max_results = self.max_results;

        let result = tokio::task::spawn_blocking(move || {
            run_search(&pattern, &search_path, case_insensitive, output_mode, max_results)
        })
        .await
        .map_err(|e| ToolError::internal(e.to_string()))??;

        if result.is_empty() {
            return Ok(ToolOutput::text("no matches"));
        }
        Ok(ToolOutput::text(result))
    }
}

fn run_search(
    pattern: &str,
    search_path: &PathBuf,
    case_insensitive: bool,
    output_mode: OutputMode,
    max_results: usize,
) -> cocode_tools_api::Result<String> {
    let matcher = RegexMatcherBuilder::new()
        .case_insensitive(case_insensitive)
        .build(pattern)
        .map_err(|e| ToolError::invalid_input(format!("invalid pattern: {e}")))?;

    let mut out = String::new();
    let mut total = 0usize;

    for entry in WalkBuilder::new(search_path).hidden(false).build() {
        if total >= max_results {
            break;
        }
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let mut lines = Vec::new();
        let searched = Searcher::new().search_path(
            &matcher,
            path,
            MatchSink { lines: &mut lines, limit: max_results - total },
        );
        if searched.is_err() || lines.is_empty() {
            continue;
        }

        match output_mode {
            OutputMode::FilesWithMatches => {
                out.push_str(&path.display().to_string());
                out.push('\n');
                total += 1;
            }
            OutputMode::Count => {
                out.push_str(&format!("{}:{}\n", path.display(), lines.len()));
                total += 1;
            }
            OutputMode::Content => {
                for (line_no, text) in &lines {
                    out.push_str(&format!("{}:{line_no}:{text}\n", path.display()));
                    total += 1;
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "grep.test.rs"]
mod tests;
