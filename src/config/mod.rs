//! Configuration management for gator.
//!
//! Configuration is read from `~/.config/gator/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! The file also carries the active session: `register` and `login` rewrite
//! `current_user_name`, `reset` removes it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const SQLITE_SCHEME: &str = "sqlite://";

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the SQLite database, a path optionally prefixed with `sqlite://`.
    pub db_url: String,
    /// Name of the logged in user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: Self::default_db_url(),
            current_user_name: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok((Self::default(), config_path));
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.clone(),
            source: e,
        })?;

        Ok((config, config_path))
    }

    /// Write the configuration back to `path`, replacing its contents.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The session user; an empty name counts as logged out.
    pub fn current_user(&self) -> Option<&str> {
        self.current_user_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Filesystem path of the database named by `db_url`.
    pub fn db_path(&self) -> PathBuf {
        let raw = self
            .db_url
            .strip_prefix(SQLITE_SCHEME)
            .unwrap_or(&self.db_url);
        PathBuf::from(raw)
    }

    /// Get the default config file path: `~/.config/gator/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gator").join("config.toml"))
    }

    fn default_db_url() -> String {
        let path = dirs::data_dir()
            .map(|dir| dir.join("gator").join("gator.db"))
            .unwrap_or_else(|| PathBuf::from("gator.db"));
        format!("{}{}", SQLITE_SCHEME, path.display())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = Self::default_config_content(&Self::default_db_url());

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(content.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content(db_url: &str) -> String {
        format!(
            r##"# gator configuration
#
# db_url points at the SQLite database. Both plain paths and
# "sqlite://<path>" are accepted.
db_url = "{}"

# Set by `gator register` and `gator login`, removed by `gator reset`.
# current_user_name = "alice"
"##,
            db_url.replace('\\', "\\\\")
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
