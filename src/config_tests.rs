//! Tests for config

use super::*;
use std::io::Write;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_missing_file_returns_defaults_without_warning() {
    let dir = TempDir::new().unwrap();
    let result = load_config_from(&dir.path().join("nope.toml"));
    assert_eq!(result.config, Config::default());
    assert!(result.warning.is_none());
}

#[test]
fn test_valid_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[evaluator]
command = "gojq"
debounce_ms = 50

[input]
read_while_paused = true
"#,
    );

    let result = load_config_from(&path);
    assert!(result.warning.is_none());
    assert_eq!(result.config.evaluator.command, "gojq");
    assert_eq!(result.config.evaluator.debounce_ms, 50);
    assert!(result.config.input.read_while_paused);
    assert_eq!(result.config.view.fallback_height, 256);
}

#[test]
fn test_malformed_toml_falls_back_with_warning() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[evaluator\ncommand = \"jq\"");

    let result = load_config_from(&path);
    assert_eq!(result.config, Config::default());
    let warning = result.warning.expect("warning expected");
    assert!(warning.starts_with("Invalid config:"), "got {warning}");
}

#[test]
fn test_wrong_type_falls_back_with_warning() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[view]\nfallback_height = \"tall\"\n");

    let result = load_config_from(&path);
    assert_eq!(result.config, Config::default());
    assert!(result.warning.is_some());
}

#[test]
fn test_unreadable_path_falls_back_with_warning() {
    // A directory exists but cannot be read as a file
    let dir = TempDir::new().unwrap();
    let result = load_config_from(dir.path());
    assert_eq!(result.config, Config::default());
    let warning = result.warning.expect("warning expected");
    assert!(warning.starts_with("Failed to read config:"), "got {warning}");
}

#[test]
fn test_config_path_location() {
    let path = get_config_path();
    assert!(path.ends_with(".config/jqed/config.toml"));
}
