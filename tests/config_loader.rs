mod common;

use cardwire::config::{Config, ConfigError};
use common::temp_config;
use std::path::PathBuf;

#[test]
fn test_config_default_values() {
    let config = Config::default();
    assert_eq!(config.connection.page_url, None);
    assert_eq!(config.connection.default_action, None);
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.logging.file, None);
    assert_eq!(config.logging.filter, None);
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("cardwire/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn test_full_file_parses() {
    let (_dir, path) = temp_config(
        r#"
[connection]
page_url = "https://example.com/flows/survey"
default_action = "intro"

[ui]
tick_rate_ms = 100

[logging]
file = "/tmp/cardwire.log"
filter = "cardwire=debug"
"#,
    );

    let config = Config::load_from(&path).expect("valid config");
    assert_eq!(
        config.connection.page_url.as_deref(),
        Some("https://example.com/flows/survey")
    );
    assert_eq!(config.connection.default_action.as_deref(), Some("intro"));
    assert_eq!(config.ui.tick_rate_ms, 100);
    assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/cardwire.log")));
    assert_eq!(config.logging.filter.as_deref(), Some("cardwire=debug"));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config("[ui]\ntick_rate_ms = 500\n");
    let config = Config::load_from(&path).expect("valid config");
    assert_eq!(config.ui.tick_rate_ms, 500);
    assert_eq!(config.connection, Default::default());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[ui\ntick_rate_ms = ");
    let err = Config::load_from(&path).expect_err("broken toml");
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_tick_rate_out_of_range_is_rejected() {
    let (_dir, path) = temp_config("[ui]\ntick_rate_ms = 1\n");
    let err = Config::load_from(&path).expect_err("tick too small");
    match err {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("ui.tick_rate_ms"), "got: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_unusable_page_url_is_rejected() {
    let (_dir, path) = temp_config("[connection]\npage_url = \"ftp://example.com/x\"\n");
    let err = Config::load_from(&path).expect_err("ftp is not supported");
    match err {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("connection.page_url"), "got: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
