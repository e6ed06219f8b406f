mod common;

use common::temp_config;
use statecell::cell::StateCell;
use statecell::config::{CellConfig, Config, ConfigError, DrainMode, MAX_HISTORY_LIMIT};

#[test]
fn test_config_default_values() {
    let config = Config::default();
    assert_eq!(config.cell.drain, DrainMode::Eager);
    assert_eq!(config.cell.history_limit, 64);
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("statecell/config.toml"));
}

#[test]
fn test_load_full_file() {
    let (_dir, path) = temp_config(
        r#"[cell]
drain = "deferred"
history_limit = 8
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.cell.drain, DrainMode::Deferred);
    assert_eq!(config.cell.history_limit, 8);
}

#[test]
fn test_missing_fields_use_defaults() {
    let (_dir, path) = temp_config("[cell]\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());

    let (_dir, path) = temp_config("");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_unknown_drain_mode_is_parse_error() {
    let (_dir, path) = temp_config("[cell]\ndrain = \"lazy\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_history_limit_validation() {
    let (_dir, path) = temp_config(&format!(
        "[cell]\nhistory_limit = {}\n",
        MAX_HISTORY_LIMIT + 1
    ));
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("history_limit"));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn test_history_limit_applies_to_cell() {
    let config = CellConfig {
        history_limit: 2,
        ..CellConfig::default()
    };
    let cell = StateCell::with_config(0, &config);
    for n in 1..=5 {
        cell.replace(n).unwrap();
    }
    let revisions: Vec<u64> = cell.history().iter().map(|r| r.revision).collect();
    assert_eq!(revisions, vec![4, 5]);
}
