use std::{fs, io, path::Path, path::PathBuf};

use directories::ProjectDirs;
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

/// How long a connect/disconnect toast stays up.
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u32 = 2000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Optional user settings.
///
/// JSON looks like:
/// `{ "assets_dir": "C:\\tray", "notifications": true, "notification_timeout_ms": 2000 }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `on.png`, `off.png` and `check.png`.
    pub assets_dir: Option<PathBuf>,
    pub notifications: bool,
    pub notification_timeout_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: None,
            notifications: true,
            notification_timeout_ms: DEFAULT_NOTIFICATION_TIMEOUT_MS,
        }
    }
}

impl Settings {
    /// `%APPDATA%\vpn_tray\config\settings.json` on Windows, `~/.config/vpn_tray/settings.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vpn_tray").map(|proj| proj.config_dir().join("settings.json"))
    }

    /// Strict load: a missing file is an error too.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if it exists. Missing or malformed files yield defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Where the tray images live; the working directory unless configured.
    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
