//! Unit tests for `GlobalConfig` parsing and validation.

use std::path::PathBuf;

use nihongo_api::config::GlobalConfig;
use nihongo_api::AppError;

#[test]
fn empty_config_uses_defaults() {
    let config = GlobalConfig::from_toml_str("").expect("empty config is valid");

    assert_eq!(config.http_host, "127.0.0.1");
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.db_path, PathBuf::from("nihongo.db"));
    assert_eq!(config.drill.default_count, 10);
    assert_eq!(config.drill.max_count, 50);
    assert_eq!(config.drill.max_attempts, 100);
    assert_eq!(config.google.state_ttl_minutes, 15);
    assert_eq!(config.google.timezone, "UTC");
    assert!(!config.google.is_configured());
    assert_eq!(config.kanji_api.host, "kanjialive-api.p.rapidapi.com");
    assert!(config.kanji_api.api_key.is_empty());
}

#[test]
fn full_config_parses() {
    let toml = r#"
http_host = "0.0.0.0"
http_port = 8080
db_path = "data/app.db"

[drill]
default_count = 5
max_count = 20
max_attempts = 40

[google]
client_id = "client-123.apps.googleusercontent.com"
redirect_uri = "http://localhost:8080/api/google-calendar/callback"
state_ttl_minutes = 5

[kanji_api]
base_url = "http://localhost:9999"
host = "kanji.test"
"#;
    let config = GlobalConfig::from_toml_str(toml).expect("valid config");

    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(config.db_path, PathBuf::from("data/app.db"));
    assert_eq!(config.drill.default_count, 5);
    assert_eq!(config.drill.max_count, 20);
    assert_eq!(config.drill.max_attempts, 40);
    assert_eq!(config.google.client_id, "client-123.apps.googleusercontent.com");
    assert_eq!(config.google.state_ttl_minutes, 5);
    assert_eq!(
        config.google.token_url,
        "https://oauth2.googleapis.com/token",
        "unset endpoints keep their defaults"
    );
    assert_eq!(config.kanji_api.base_url, "http://localhost:9999");
}

#[test]
fn secrets_are_never_read_from_toml() {
    let toml = r#"
[google]
client_id = "id"
redirect_uri = "http://localhost/cb"
client_secret = "from-file"

[kanji_api]
api_key = "from-file"
"#;
    let config = GlobalConfig::from_toml_str(toml).expect("valid config");

    assert!(config.google.client_secret.is_empty());
    assert!(config.kanji_api.api_key.is_empty());
}

#[test]
fn default_count_above_max_is_rejected() {
    let toml = "[drill]\ndefault_count = 60\nmax_count = 50\n";
    let err = GlobalConfig::from_toml_str(toml).expect_err("must fail");
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("default_count")));
}

#[test]
fn zero_max_attempts_is_rejected() {
    let err = GlobalConfig::from_toml_str("[drill]\nmax_attempts = 0\n").expect_err("must fail");
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("max_attempts")));
}

#[test]
fn zero_max_count_is_rejected() {
    let err = GlobalConfig::from_toml_str("[drill]\nmax_count = 0\n").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn client_id_without_redirect_uri_is_rejected() {
    let err = GlobalConfig::from_toml_str("[google]\nclient_id = \"abc\"\n").expect_err("must fail");
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("redirect_uri")));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = GlobalConfig::from_toml_str("http_port = \"not a number\"").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn load_from_path_reads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "http_port = 4321\n").expect("write config");

    let config = GlobalConfig::load_from_path(&path).expect("load");
    assert_eq!(config.http_port, 4321);
}

#[test]
fn load_from_missing_path_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = GlobalConfig::load_from_path(dir.path().join("absent.toml")).expect_err("must fail");
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("failed to read config")));
}

#[test]
fn shipped_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml");
    let config = GlobalConfig::load_from_path(path).expect("example config loads");
    assert_eq!(config.google.timezone, "Asia/Tokyo");
    assert!(config.google.client_id.is_empty());
}
