//! User preferences.
//!
//! Stored as JSON in the home directory.  Only presentation and input
//! behaviour is configurable; gameplay constants live in `consts`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default settings file name, placed in `$HOME`.
pub const SETTINGS_FILE: &str = ".space_shooter.json";

/// Default log file name, placed in the system temp directory.
pub const LOG_FILE: &str = "space_shooter.log";

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings file: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// A key counts as held for this many frames after its last press or
    /// repeat event.  Terminals without release events need this to be
    /// longer than the OS key-repeat interval.
    pub key_hold_frames: u64,
    /// Report mouse clicks so the menu can be started with a click.
    pub mouse_capture: bool,
    /// Show the key legend on the bottom row.
    pub show_controls_hint: bool,
    /// Where log output goes.  `None` means the temp directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // 8 frames ≈ 133 ms at 60 FPS, above the slowest common repeat rate
            key_hold_frames: 8,
            mouse_capture: true,
            show_controls_hint: true,
            log_file: None,
        }
    }
}

impl Settings {
    /// `$HOME/.space_shooter.json`, or the working directory without a home.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(SETTINGS_FILE)
    }

    /// Log file to use, falling back to the temp directory.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE))
    }

    /// Read settings from `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }
}
