use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CleanError, Result};
use crate::record::columns::DEFAULT_DROPPED;

const CONFIG_FILE: &str = "cleaner.toml";

/// Tunables of a cleaning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    /// Columns removed after tags are merged
    pub columns_to_drop: Vec<String>,
    /// Inclusive bounds on the cleaned short description (file-source runs only)
    pub min_description_length: usize,
    pub max_description_length: usize,
    /// Minimum normalized tag count a record must keep
    pub min_tags: usize,
    /// Domain stop tokens removed from cleaned descriptions
    pub words_to_remove: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            columns_to_drop: DEFAULT_DROPPED.iter().map(|c| c.to_string()).collect(),
            min_description_length: 30,
            max_description_length: 240,
            min_tags: 3,
            words_to_remove: vec!["game".to_string(), "world".to_string()],
        }
    }
}

impl CleanerConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `cleaner.toml` in the
    /// platform config directory is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(CleanError::Config(format!(
                    "config file not found: {:?}",
                    path
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_path().filter(|p| p.exists()),
        };

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CleanError::Config(format!("failed to read {:?}: {}", path, e)))?;
        Self::from_toml(&text)
            .map_err(|e| CleanError::Config(format!("invalid config {:?}: {}", path, e)))
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_description_length > self.max_description_length {
            return Err(CleanError::Config(format!(
                "min_description_length ({}) exceeds max_description_length ({})",
                self.min_description_length, self.max_description_length
            )));
        }
        Ok(())
    }
}

/// `cleaner.toml` under the platform config directory
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "game-catalog-cleaner").map(|d| d.config_dir().join(CONFIG_FILE))
}
