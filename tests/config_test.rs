//! Integration tests for layered Settings loading.
//!
//! Only `given_env_override_when_load_then_env_wins` touches the process
//! environment, and only `OFFSPRING_PROMPT`; no other test asserts on the
//! prompt after `Settings::load`.

use std::fs;

use tempfile::TempDir;

use offspring::application::ApplicationError;
use offspring::config::{RawSettings, Settings};
use offspring::domain::QUEUE_SIZE;

#[test]
fn given_defaults_then_prompt_and_queue_size() {
    let settings = Settings::default();
    assert_eq!(settings.prompt, "offspring> ");
    assert_eq!(settings.queue_increment, QUEUE_SIZE);
    assert!(settings.color);
}

#[test]
fn given_partial_file_when_load_file_then_unset_fields_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offspring.toml");
    fs::write(&path, "queue_increment = 8\n").unwrap();

    let settings = Settings::load_file(&path).expect("load settings");

    assert_eq!(settings.queue_increment, 8);
    assert_eq!(settings.prompt, "offspring> ");
    assert!(settings.color);
}

#[test]
fn given_full_file_when_load_file_then_all_fields_applied() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offspring.toml");
    fs::write(
        &path,
        r#"
prompt = "family$ "
queue_increment = 4
color = false
"#,
    )
    .unwrap();

    let settings = Settings::load_file(&path).unwrap();

    assert_eq!(
        settings,
        Settings {
            prompt: "family$ ".into(),
            queue_increment: 4,
            color: false,
        }
    );
}

#[test]
fn given_zero_increment_when_load_file_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offspring.toml");
    fs::write(&path, "queue_increment = 0\n").unwrap();

    let result = Settings::load_file(&path);
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_file_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offspring.toml");
    fs::write(&path, "prompt = [unclosed\n").unwrap();

    let err = Settings::load_file(&path).unwrap_err();
    assert!(err.to_string().contains("offspring.toml"));
}

#[test]
fn given_missing_file_when_load_file_then_config_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load_file(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_overlay_when_merging_then_overlay_wins_where_set() {
    let base = Settings::default();
    let overlay = RawSettings {
        prompt: Some("? ".into()),
        queue_increment: None,
        color: Some(false),
    };

    let merged = base.merge_with(&overlay);

    assert_eq!(merged.prompt, "? ");
    assert_eq!(merged.queue_increment, base.queue_increment);
    assert!(!merged.color);
}

#[test]
fn given_env_override_when_load_then_env_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offspring.toml");
    fs::write(&path, "prompt = \"file> \"\nqueue_increment = 8\n").unwrap();

    std::env::set_var("OFFSPRING_PROMPT", "env> ");
    let settings = Settings::load(Some(path.as_path()));
    std::env::remove_var("OFFSPRING_PROMPT");

    let settings = settings.unwrap();
    assert_eq!(settings.prompt, "env> ");
    assert_eq!(settings.queue_increment, 8);
}

#[test]
fn given_zero_increment_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offspring.toml");
    fs::write(&path, "queue_increment = 0\n").unwrap();

    let result = Settings::load(Some(path.as_path()));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
