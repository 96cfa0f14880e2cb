use rebike::config::{Config, ConfigError};
use std::path::PathBuf;

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://localhost:5000/api");
    assert_eq!(config.api.timeout_seconds, 15);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.marketplace.min_offer_amount, 500);
    assert_eq!(config.marketplace.max_cart_quantity, 10);
    assert!(config.session.path.is_none());
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("rebike/config.toml"));
}

#[test]
fn test_default_session_path_is_under_data_dir() {
    let path = Config::default().session_path();
    assert!(path.ends_with("rebike/session.toml"));
}

#[test]
fn test_validation_passes_for_default() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validation_fails_zero_min_offer() {
    let mut config = Config::default();
    config.marketplace.min_offer_amount = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("min_offer_amount"));
}

/// Test loading a complete file.
#[test]
fn test_load_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "https://api.rebike.in/api"
timeout_seconds = 20
connect_timeout_seconds = 3

[marketplace]
min_offer_amount = 800
max_cart_quantity = 4

[session]
path = "/var/tmp/rebike/session.toml"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.api.timeout_seconds, 20);
    assert_eq!(config.api.request_timeout().as_secs(), 20);
    assert_eq!(config.api.connect_timeout().as_secs(), 3);
    assert_eq!(config.marketplace.min_offer_amount, 800);
    assert_eq!(config.marketplace.max_cart_quantity, 4);
    assert_eq!(
        config.session_path(),
        PathBuf::from("/var/tmp/rebike/session.toml")
    );
}

#[test]
fn test_unreadable_path_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory exists but cannot be read as a file.
    let result = Config::load_from(dir.path());
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\ntimeout_seconds = \"soon\"\n").unwrap();
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}
