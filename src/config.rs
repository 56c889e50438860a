//! Dataset path configuration.
//!
//! The CLI reads its dataset locations from a small TOML file:
//!
//! ```toml
//! [data]
//! neos_csv = "data/neos.csv"
//! cad_json = "data/cad.json"
//! ```
//!
//! Both keys default to the paths above when the file (or a key) is absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Name of the configuration file searched for by default.
pub const CONFIG_FILE_NAME: &str = "neo.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataSettings,
}

/// Dataset file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_neos_csv")]
    pub neos_csv: PathBuf,
    #[serde(default = "default_cad_json")]
    pub cad_json: PathBuf,
}

fn default_neos_csv() -> PathBuf {
    PathBuf::from("data/neos.csv")
}

fn default_cad_json() -> PathBuf {
    PathBuf::from("data/cad.json")
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            neos_csv: default_neos_csv(),
            cad_json: default_cad_json(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default locations.
    ///
    /// Searches for `neo.toml` in the current directory, a `config/`
    /// subdirectory, and the parent directory; falls back to the built-in
    /// defaults when none exists.
    pub fn from_default_location() -> ConfigResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("config").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}
