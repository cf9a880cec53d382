use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "autochangeset.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE_NAME: &str = ".autochangeset.toml";

/// Represents the complete configuration for auto-changeset.
///
/// Contains changeset directory settings, the git backend selection and an
/// optional package name override.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub changeset: ChangesetConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub package: PackageConfig,
}

fn default_directory() -> String {
    ".changeset".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

/// Files inside the changeset directory that never count as changesets.
fn default_reserved_files() -> Vec<String> {
    vec!["README.md".to_string(), "config.json".to_string()]
}

fn default_file_prefix() -> String {
    "auto-".to_string()
}

/// Where changesets live and how generated ones are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangesetConfig {
    /// Directory relative to the working directory
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Extension (without the dot) of changeset documents
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_reserved_files")]
    pub reserved_files: Vec<String>,

    /// Prefix of generated file names, followed by a random hex identifier
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for ChangesetConfig {
    fn default() -> Self {
        ChangesetConfig {
            directory: default_directory(),
            extension: default_extension(),
            reserved_files: default_reserved_files(),
            file_prefix: default_file_prefix(),
        }
    }
}

/// Which implementation answers version-control queries.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// In-process history walk through libgit2
    #[default]
    Libgit2,
    /// The `git` executable found on `PATH`
    Cli,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct GitConfig {
    #[serde(default)]
    pub backend: GitBackend,
}

/// Package metadata overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PackageConfig {
    /// When set, the package manifest is not read at all
    #[serde(default)]
    pub name: Option<String>,
}

/// Resolved locations every pipeline stage works against.
///
/// Built once at start-up so no component depends on the process's current
/// directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub working_dir: PathBuf,
    pub changeset_dir: PathBuf,
}

impl Workspace {
    pub fn new(working_dir: impl Into<PathBuf>, config: &Config) -> Self {
        let working_dir = working_dir.into();
        let changeset_dir = working_dir.join(&config.changeset.directory);
        Workspace {
            working_dir,
            changeset_dir,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autochangeset.toml` in the working directory
/// 3. `.autochangeset.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, working_dir: &Path) -> Result<Config> {
    let local = working_dir.join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE_NAME);
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.changeset.directory.trim().is_empty() {
            return Err(crate::ChangesetError::config(
                "changeset.directory must not be empty",
            ));
        }
        if self.changeset.extension.is_empty() || self.changeset.extension.starts_with('.') {
            return Err(crate::ChangesetError::config(format!(
                "changeset.extension must be a bare extension such as \"md\", got '{}'",
                self.changeset.extension
            )));
        }
        Ok(())
    }
}
