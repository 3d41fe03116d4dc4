//! Session file path construction.

use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// Escape a workspace path into a directory-safe component: strip the
/// leading separator, replace `/`, `\`, `:` with `-`, wrap the result in
/// `--`.
pub fn escape_cwd(cwd: &Path) -> String {
    let raw = cwd.to_string_lossy();
    let stripped = raw.strip_prefix(|c| c == '/' || c == '\\').unwrap_or(&raw);
    let escaped: String = stripped
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect();
    format!("--{escaped}--")
}

/// `<base_dir>/sessions/<escaped-cwd>/`
pub fn sessions_dir(base_dir: &Path, cwd: &Path) -> PathBuf {
    base_dir.join("sessions").join(escape_cwd(cwd))
}

/// `<base_dir>/sessions/<escaped-cwd>/<timestamp>_<uuid>.jsonl`
pub fn session_file_path(
    base_dir: &Path,
    cwd: &Path,
    timestamp: DateTime<Utc>,
    session_id: Uuid,
) -> PathBuf {
    let file_name = format!("{}_{session_id}.jsonl", timestamp.format("%Y%m%dT%H%M%S%.3fZ"));
    sessions_dir(base_dir, cwd).join(file_name)
}

#[cfg(test)]
#[path = "dir.test.rs"]
mod tests;
