//! Integration tests for `greenscan config` and the config paths other commands use.
//!
//! Tests config validation and scanner config derivation with real TOML files.

use std::fs;
use tempfile::TempDir;

use greenscan_core::config::GreenscanConfig;
use greenscan_scanner::ScannerConfig;

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("greenscan.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[lookup]
request_timeout_secs = 10

[[lookup.mirrors]]
name = "fr"
base_url = "https://fr.openfoodfacts.org"

[history]
capacity = 100
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let config = GreenscanConfig::load(&config_path)
        .await
        .expect("valid config should load successfully");

    // Then: Scanner config derives from it
    let scanner = ScannerConfig::from_core(&config);
    scanner.validate().expect("derived scanner config is valid");
    assert_eq!(scanner.mirrors.len(), 1);
    assert_eq!(scanner.mirrors[0].name, "fr");
    assert_eq!(scanner.history_capacity, 100);
    assert_eq!(scanner.request_timeout_secs, 10);
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");

    fs::write(&config_path, "[general\nlog_level = \"info\"\n").expect("should write bad config");

    let result = GreenscanConfig::load(&config_path).await;
    assert!(result.is_err(), "malformed TOML should fail to load");
}

#[tokio::test]
async fn test_config_validate_missing_file() {
    let config_path = std::path::PathBuf::from("/nonexistent/greenscan.toml");

    let result = GreenscanConfig::load(&config_path).await;
    assert!(result.is_err(), "missing file should fail strict validation");
}

#[tokio::test]
async fn test_lookup_runs_without_config_file() {
    // Given: No config file at all
    let config_path = std::path::PathBuf::from("/nonexistent/greenscan.toml");

    // When: Loading the way lookup/history do
    let config = GreenscanConfig::load_or_default(&config_path)
        .await
        .expect("missing file falls back to defaults");

    // Then: Default mirrors and history apply
    let scanner = ScannerConfig::from_core(&config);
    let names: Vec<_> = scanner.mirrors.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["world", "uk", "us"]);
    assert_eq!(scanner.history_capacity, 50);
}

#[tokio::test]
async fn test_config_validate_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");

    fs::write(&config_path, "").expect("should write empty file");

    let config = GreenscanConfig::load(&config_path)
        .await
        .expect("empty config is all defaults");
    assert_eq!(config.general.log_level, "warn");
    assert!(config.history.enabled);
}

#[tokio::test]
async fn test_config_validate_rejects_zero_capacity() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("zero.toml");

    fs::write(&config_path, "[history]\ncapacity = 0\n").expect("should write config");

    let err = GreenscanConfig::load(&config_path)
        .await
        .expect_err("capacity 0 is invalid");
    assert!(err.to_string().contains("capacity"));
}

#[tokio::test]
async fn test_config_validate_rejects_non_http_mirror() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ftp.toml");

    let config = r#"
[[lookup.mirrors]]
name = "ftp"
base_url = "ftp://mirror.example"
"#;
    fs::write(&config_path, config).expect("should write config");

    let result = GreenscanConfig::load(&config_path).await;
    assert!(result.is_err(), "ftp mirrors are rejected");
}

#[tokio::test]
async fn test_effective_config_round_trips_through_toml() {
    // `config show` prints TOML that must load back into the same config
    let original = GreenscanConfig::default();
    let rendered = toml::to_string_pretty(&original).expect("config serializes");

    let reparsed = GreenscanConfig::parse(&rendered).expect("rendered config parses");
    assert_eq!(reparsed.lookup.mirrors, original.lookup.mirrors);
    assert_eq!(reparsed.history.capacity, original.history.capacity);
    assert_eq!(reparsed.general.data_dir, original.general.data_dir);
}
