//! Global timetable configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{TimetableError, TimetableResult};
use crate::storage::FileStorage;

static DEFAULT_STATE_DIR: &str = "~/.local/share/timetable";

fn default_state_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_DIR)
}

fn is_default_state_dir(p: &PathBuf) -> bool {
    *p == default_state_dir()
}

/// Global configuration at ~/.config/timetable/config.toml
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TimetableConfig {
    #[serde(default = "default_state_dir", skip_serializing_if = "is_default_state_dir")]
    pub state_dir: PathBuf,

    /// Group shown when none has been selected yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_group: Option<String>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        TimetableConfig {
            state_dir: default_state_dir(),
            default_group: None,
        }
    }
}

impl TimetableConfig {
    pub fn config_path() -> TimetableResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TimetableError::Config("Could not determine config directory".into()))?
            .join("timetable");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, creating a commented-out default on first run.
    pub fn load() -> TimetableResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::create_default_config(&path)?;
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> TimetableResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| TimetableError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TimetableError::Config(e.to_string()))
    }

    pub fn save(&self) -> TimetableResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> TimetableResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| TimetableError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| TimetableError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// `state_dir` with `~` expanded.
    pub fn state_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.state_dir.to_string_lossy()).into_owned())
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.state_path())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TimetableResult<()> {
        let contents = format!(
            "\
# timetable configuration

# Where missed marks and custom lessons are kept:
# state_dir = \"{}\"

# Group to show before one is chosen with `timetable use`:
# default_group = \"bn-3-2\"
",
            DEFAULT_STATE_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TimetableError::Config(format!("Could not create config directory: {e}")))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TimetableError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
