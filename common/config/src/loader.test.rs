use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

#[test]
fn missing_file_path_loads_defaults() {
    let loader = ConfigLoader::new(None);
    let config = loader.load().unwrap();
    assert_eq!(config, RuntimeConfig::default());
}

#[test]
fn nonexistent_path_loads_defaults() {
    let loader = ConfigLoader::new(Some(PathBuf::from("/nonexistent/cocode/config.toml")));
    let config = loader.load().unwrap();
    assert_eq!(config, RuntimeConfig::default());
}

#[test]
fn loads_and_parses_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[compact]\nenabled = false\n").unwrap();
    let loader = ConfigLoader::new(Some(file.path().to_path_buf()));
    let config = loader.load().unwrap();
    assert!(!config.compact.enabled);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "not valid toml [[[").unwrap();
    let loader = ConfigLoader::new(Some(file.path().to_path_buf()));
    assert!(loader.load().is_err());
}
