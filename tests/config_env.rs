use rebike::config::{Config, API_URL_ENV};

/// Mutates the process environment, so it stays the only test in this binary.
#[test]
fn test_env_overrides_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nbase_url = \"https://file.example.com/api\"\n").unwrap();

    std::env::set_var(API_URL_ENV, "https://env.example.com/api");
    let from_file = Config::load_from(&path);
    let without_file = Config::load_from(&dir.path().join("absent.toml"));
    std::env::set_var(API_URL_ENV, "not-a-url");
    let invalid = Config::load_from(&path);
    std::env::remove_var(API_URL_ENV);

    assert_eq!(
        from_file.unwrap().api.base_url,
        "https://env.example.com/api"
    );
    assert_eq!(
        without_file.unwrap().api.base_url,
        "https://env.example.com/api"
    );
    assert!(invalid.is_err());

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://file.example.com/api");
}
