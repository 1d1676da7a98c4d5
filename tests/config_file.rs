//! Configuration File Tests

use std::fs;

use svcreg::config::{ConfigError, ServerConfig};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("svcreg.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_full_config() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"{
            "host": "127.0.0.1",
            "port": 9090,
            "default_page_size": 10,
            "max_page_size": 20,
            "allowed_origin": "http://localhost:5173"
        }"#,
    );

    let config = ServerConfig::load(&path).unwrap();
    assert_eq!(config.socket_addr(), "127.0.0.1:9090");
    assert_eq!(config.page_limits().default_size, 10);
    assert_eq!(config.page_limits().max_size, 20);
    assert_eq!(config.allowed_origin.as_deref(), Some("http://localhost:5173"));
}

#[test]
fn test_empty_object_is_all_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, "{}");
    assert_eq!(ServerConfig::load(&path).unwrap(), ServerConfig::default());
}

#[test]
fn test_invalid_configs() {
    let tmp = TempDir::new().unwrap();

    let path = write_config(&tmp, "{ port: 1 }");
    assert!(matches!(ServerConfig::load(&path), Err(ConfigError::Parse(_))));

    let path = write_config(&tmp, r#"{"default_page_size": 500}"#);
    assert!(matches!(ServerConfig::load(&path), Err(ConfigError::Invalid(_))));

    let missing = tmp.path().join("missing.json");
    assert!(matches!(
        ServerConfig::load(&missing),
        Err(ConfigError::Read { .. })
    ));
}
