//! Configuration loading and data directory resolution

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::media::{PHOTOS_DIR, THUMBNAILS_DIR};
use crate::state::library::OUTFITS_KEY;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "FITCHECK_DATA_DIR";

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "fitcheck.db";

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root for the database, photos and thumbnails
    pub data_dir: Option<PathBuf>,
    /// Key the outfit collection is stored under
    pub storage_key: String,
    /// Photo directory name under the data root
    pub photos_dir: String,
    /// Thumbnail directory name under the data root
    pub thumbnails_dir: String,
    pub analysis_delay_ms: u64,
    pub background_removal_delay_ms: u64,
    /// Coordinates passed to the weather provider on capture
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: None,
            storage_key: OUTFITS_KEY.to_string(),
            photos_dir: PHOTOS_DIR.to_string(),
            thumbnails_dir: THUMBNAILS_DIR.to_string(),
            analysis_delay_ms: 1500,
            background_removal_delay_ms: 2000,
            latitude: 37.7749,
            longitude: -122.4194,
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// (`~/.config/fitcheck/config.toml` on Linux) is used if present,
    /// otherwise compiled defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(Error::Config("storage_key must not be empty".to_string()));
        }
        if self.photos_dir.is_empty() || self.thumbnails_dir.is_empty() {
            return Err(Error::Config("media directory names must not be empty".to_string()));
        }
        if self.photos_dir == self.thumbnails_dir {
            return Err(Error::Config(
                "photos_dir and thumbnails_dir must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Data directory in priority order:
    /// 1. Command-line argument
    /// 2. `FITCHECK_DATA_DIR`
    /// 3. `data_dir` from the config file
    /// 4. OS data directory
    pub fn resolve_data_dir(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(DATA_DIR_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        default_data_dir()
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn background_removal_delay(&self) -> Duration {
        Duration::from_millis(self.background_removal_delay_ms)
    }
}

/// Platform config file location
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fitcheck").join("config.toml"))
}

/// OS-dependent default data directory
/// - Linux: ~/.local/share/fitcheck
/// - macOS: ~/Library/Application Support/fitcheck
/// - Windows: %APPDATA%\fitcheck
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join("fitcheck"))
        .unwrap_or_else(|| PathBuf::from("./fitcheck_data"))
}
