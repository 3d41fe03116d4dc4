use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

#[test]
fn from_path_loads_file_contents() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[loop]\nmax_concurrent_tools = 2\n").unwrap();
    let manager = ConfigManager::from_path(file.path().to_path_buf()).unwrap();
    assert_eq!(manager.current().r#loop.max_concurrent_tools, 2);
}

#[test]
fn update_mutates_in_process_snapshot_without_touching_disk() {
    let manager = ConfigManager::new(ConfigLoader::new(None)).unwrap();
    manager.update(|config| config.r#loop.max_concurrent_tools = 99);
    assert_eq!(manager.current().r#loop.max_concurrent_tools, 99);
}

#[test]
fn reload_replaces_in_process_overrides_with_disk_state() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[loop]\nmax_concurrent_tools = 2\n").unwrap();
    let manager = ConfigManager::from_path(file.path().to_path_buf()).unwrap();
    manager.update(|config| config.r#loop.max_concurrent_tools = 99);
    manager.reload().unwrap();
    assert_eq!(manager.current().r#loop.max_concurrent_tools, 2);
}
