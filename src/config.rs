use crate::error::{RepokitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for repokit.
///
/// Contains where to look for project documents and how versions are advanced.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub readme: ReadmeConfig,

    #[serde(default)]
    pub version: VersionConfig,
}

/// Returns the default change-log file candidates, in lookup order.
fn default_changelog_files() -> Vec<String> {
    vec![
        "CHANGELOG.md".to_string(),
        "CHANGELOG.rst".to_string(),
        "docs/changelog.rst".to_string(),
    ]
}

fn default_version_prefix() -> String {
    "v".to_string()
}

/// Returns the default README file candidates.
fn default_readme_files() -> Vec<String> {
    vec!["README.rst".to_string()]
}

/// Configuration for change-log handling.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_files")]
    pub files: Vec<String>,

    /// Prepended to version numbers in section headers
    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,

    /// Intro text for a change-log created from scratch
    #[serde(default)]
    pub initial_intro: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            files: default_changelog_files(),
            version_prefix: default_version_prefix(),
            initial_intro: String::new(),
        }
    }
}

/// Configuration for README handling.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReadmeConfig {
    #[serde(default = "default_readme_files")]
    pub files: Vec<String>,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        ReadmeConfig {
            files: default_readme_files(),
        }
    }
}

/// Configuration for version arithmetic.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VersionConfig {
    /// Advance final releases with a post-release bump instead of a minor bump
    #[serde(default)]
    pub post_releases: bool,

    /// Use the UTC calendar day for date bumps and release dates
    #[serde(default)]
    pub utc_dates: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `repokit.toml` in current directory
/// 3. `repokit.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| RepokitError::config(format!("cannot read {}: {}", path, e)))?
    } else if Path::new("./repokit.toml").exists() {
        fs::read_to_string("./repokit.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("repokit.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
