use crate::error::{Result, SemverError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the repository and user config directory
pub const CONFIG_FILE_NAME: &str = "autosemver.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "AUTOSEMVER_CONFIG";

/// Represents the complete configuration for auto-semver.
///
/// Every field has a default, so an empty file (or no file) is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prefix of release tags created by `release` (parsing accepts tags with or without `v`)
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Number of hex characters of the commit id placed in pre-release versions
    #[serde(default = "default_short_id_length")]
    pub short_id_length: usize,

    /// Build identifier appended when the working tree has local modifications
    #[serde(default = "default_dirty_marker")]
    pub dirty_marker: String,

    /// Count untracked files as local modifications
    #[serde(default)]
    pub untracked_is_dirty: bool,

    #[serde(default)]
    pub bump: BumpConfig,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_short_id_length() -> usize {
    7
}

fn default_dirty_marker() -> String {
    "dirty".to_string()
}

/// Returns the default list of commit types that signal a feature.
fn default_feature_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default list of footer tokens that signal a breaking change.
fn default_breaking_footers() -> Vec<String> {
    vec!["BREAKING CHANGE".to_string(), "BREAKING-CHANGE".to_string()]
}

/// Markers the bump classifier looks for in commit messages.
///
/// A commit is breaking when its header carries `!` or a footer token is listed in
/// `breaking_footers`; it is a feature when its conventional type is listed in
/// `feature_types`. Everything else counts as a patch-level change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BumpConfig {
    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,

    #[serde(default = "default_breaking_footers")]
    pub breaking_footers: Vec<String>,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            feature_types: default_feature_types(),
            breaking_footers: default_breaking_footers(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_prefix: default_tag_prefix(),
            short_id_length: default_short_id_length(),
            dirty_marker: default_dirty_marker(),
            untracked_is_dirty: false,
            bump: BumpConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)
            .map_err(|e| SemverError::config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce illegal versions or tags
    pub fn validate(&self) -> Result<()> {
        if !(4..=40).contains(&self.short_id_length) {
            return Err(SemverError::config(format!(
                "short_id_length must be between 4 and 40, got {}",
                self.short_id_length
            )));
        }

        if !is_identifier(&self.dirty_marker) {
            return Err(SemverError::config(format!(
                "dirty_marker '{}' is not a valid build identifier (use [0-9A-Za-z-])",
                self.dirty_marker
            )));
        }

        if self.tag_prefix.chars().any(|c| c.is_whitespace() || c == '~' || c == '^' || c == ':') {
            return Err(SemverError::config(format!(
                "tag_prefix '{}' cannot be used in a tag name",
                self.tag_prefix
            )));
        }

        if let Some(bad) = self.bump.feature_types.iter().find(|t| t.trim().is_empty()) {
            return Err(SemverError::config(format!(
                "feature_types contains an empty entry: {:?}",
                bad
            )));
        }

        Ok(())
    }
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. Path named by the `AUTOSEMVER_CONFIG` environment variable
/// 3. `autosemver.toml` in the repository work directory
/// 4. `autosemver.toml` in the user config directory
/// 5. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Work directory of the repository being versioned, if any
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> Result<Config> {
    match locate_config(config_path, repo_root) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let text = fs::read_to_string(&path).map_err(|e| {
                SemverError::config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            Config::from_toml(&text)
        }
        None => Ok(Config::default()),
    }
}

fn locate_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let in_repo = repo_root.map(|root| root.join(CONFIG_FILE_NAME));
    let in_user_dir = dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME));

    in_repo
        .into_iter()
        .chain(in_user_dir)
        .find(|candidate| candidate.is_file())
}
