// tests/config_test.rs
use auto_semver::config::{load_config, Config, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use auto_semver::SemverError;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
#[serial]
fn test_load_from_file() {
    let temp_file = write_config(
        r#"
tag_prefix = "release-"
short_id_length = 10
dirty_marker = "modified"
untracked_is_dirty = true

[bump]
feature_types = ["feat", "feature"]
breaking_footers = ["BREAKING CHANGE"]
"#,
    );

    let config = load_config(Some(temp_file.path()), None).unwrap();
    assert_eq!(config.tag_prefix, "release-");
    assert_eq!(config.short_id_length, 10);
    assert_eq!(config.dirty_marker, "modified");
    assert!(config.untracked_is_dirty);
    assert!(config.bump.feature_types.contains(&"feature".to_string()));
    assert_eq!(config.bump.breaking_footers, vec!["BREAKING CHANGE"]);
}

#[test]
#[serial]
fn test_repository_config_is_found() {
    env::remove_var(CONFIG_ENV_VAR);
    let repo_root = TempDir::new().unwrap();
    fs::write(repo_root.path().join(CONFIG_FILE_NAME), "tag_prefix = \"ver\"\n").unwrap();

    let config = load_config(None, Some(repo_root.path())).unwrap();
    assert_eq!(config.tag_prefix, "ver");
}

#[test]
#[serial]
fn test_env_var_overrides_repository_config() {
    let repo_root = TempDir::new().unwrap();
    fs::write(repo_root.path().join(CONFIG_FILE_NAME), "tag_prefix = \"ver\"\n").unwrap();
    let from_env = write_config("tag_prefix = \"env-\"\n");

    env::set_var(CONFIG_ENV_VAR, from_env.path());
    let result = load_config(None, Some(repo_root.path()));
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(result.unwrap().tag_prefix, "env-");
}

#[test]
#[serial]
fn test_explicit_path_overrides_env_var() {
    let from_env = write_config("tag_prefix = \"env-\"\n");
    let explicit = write_config("tag_prefix = \"cli-\"\n");

    env::set_var(CONFIG_ENV_VAR, from_env.path());
    let result = load_config(Some(explicit.path()), None);
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(result.unwrap().tag_prefix, "cli-");
}

#[test]
#[serial]
fn test_invalid_file_is_config_error() {
    let temp_file = write_config("short_id_length = 2\n");
    let result = load_config(Some(temp_file.path()), None);
    assert!(matches!(result, Err(SemverError::Config(_))));

    let temp_file = write_config("tag_prefix = [\n");
    let result = load_config(Some(temp_file.path()), None);
    assert!(matches!(result, Err(SemverError::Config(_))));
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.tag_prefix, "v");
    assert_eq!(config.bump.feature_types, vec!["feat"]);
    assert!(config.validate().is_ok());
}
