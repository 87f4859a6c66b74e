//! Tests for TOML config loading and env overrides.

use super::loader::apply_overrides;
use super::*;
use crate::schema::PicassoConfig;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_picasso_config.toml"));
    assert!(matches!(
        result.unwrap_err(),
        picasso_common::ConfigError::FileNotFound(_)
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[endpoints]
base_url = "https://abc.supabase.co"
api_key = "anon"

[http]
connect_timeout_secs = 5
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.endpoints.base_url, "https://abc.supabase.co");
    assert_eq!(config.endpoints.api_key, "anon");
    assert_eq!(config.http.connect_timeout_secs, 5);
    // Defaults preserved
    assert_eq!(config.endpoints.chat_path, "functions/v1/chat");
    assert_eq!(config.storage.history_key, "picasso-chat-history");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, picasso_common::ConfigError::ParseError(_)));
}

#[test]
fn created_default_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    create_default_config(&path).unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, PicassoConfig::default());
}

#[test]
fn env_overrides_replace_endpoint_fields() {
    let mut config = PicassoConfig::default();
    apply_overrides(&mut config, |key| match key {
        ENV_BASE_URL => Some("https://override.example".into()),
        ENV_API_KEY => Some("key-123".into()),
        _ => None,
    });
    assert_eq!(config.endpoints.base_url, "https://override.example");
    assert_eq!(config.endpoints.api_key, "key-123");
}

#[test]
fn blank_env_overrides_are_ignored() {
    let mut config = PicassoConfig::default();
    apply_overrides(&mut config, |_| Some("   ".into()));
    assert_eq!(config, PicassoConfig::default());
}
