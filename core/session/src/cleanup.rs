//! Startup housekeeping: a session file that only ever received its header
//! (the user quit before sending a prompt) is noise, not history.

use std::fs;
use std::path::Path;

use crate::reader;

/// Delete every `*.jsonl` file directly under `dir` whose entry count is
/// exactly one (header-only). Returns the number of files removed. Best
/// effort: a file that can't be read or removed is left alone, not fatal.
pub fn remove_header_only_sessions(dir: &Path) -> usize {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in read_dir.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        if reader::parse_tolerant(&contents).len() == 1 && fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
#[path = "cleanup.test.rs"]
mod tests;
