use std::path::Path;

use super::*;

#[test]
fn escapes_unix_path() {
    let escaped = escape_cwd(Path::new("/home/user/project"));
    assert_eq!(escaped, "--home-user-project--");
}

#[test]
fn escapes_windows_style_separators_and_drive_colon() {
    let escaped = escape_cwd(Path::new("C:\\Users\\dev\\project"));
    assert_eq!(escaped, "--C--Users-dev-project--");
}

#[test]
fn relative_path_is_wrapped_without_a_stripped_leading_char() {
    let escaped = escape_cwd(Path::new("relative/path"));
    assert_eq!(escaped, "--relative-path--");
}

#[test]
fn session_file_path_has_jsonl_extension_and_session_id() {
    let id = Uuid::nil();
    let ts = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let path = session_file_path(Path::new("/base"), Path::new("/work"), ts, id);
    let name = path.file_name().unwrap().to_string_lossy();
    assert!(name.ends_with(&format!("_{id}.jsonl")));
    assert!(path.starts_with(sessions_dir(Path::new("/base"), Path::new("/work"))));
}
