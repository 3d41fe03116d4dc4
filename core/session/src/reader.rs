//! Tolerant JSONL reading: malformed lines and unrecognized entry types are
//! skipped rather than failing the whole read.

use cocode_protocol::SessionEntry;
use tracing::warn;

/// Parse a session file's contents into entries, skipping any line whose
/// `type` tag is unrecognized or whose JSON is malformed. A line that
/// parses as valid JSON but carries a `type` this build doesn't know about
/// is silently dropped, not an error — that's the forward-compat contract.
pub fn parse_tolerant(contents: &str) -> Vec<SessionEntry> {
    let mut out = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<SessionEntry>(line) {
            Ok(entry) => out.push(entry),
            Err(_) => {
                // Distinguish "unknown type" (forward-compat, silent) from
                // genuinely corrupt JSON (worth a log line) by checking
                // whether the line at least parses as a JSON object.
                if serde_json::from_str::<serde_json::Value>(line).is_err() {
                    warn!(line = line_no + 1, "skipping corrupt session log line");
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "reader.test.rs"]
mod tests;
