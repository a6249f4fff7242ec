use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::settings::{CaptureSettings, ScreenSettings};

/// Saved capture preferences for persistence across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPrefs {
    pub capture: CaptureSettings,
    pub screen: ScreenSettings,
}

impl SessionPrefs {
    /// Get the path to the preferences file.
    fn prefs_file_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("vidgrid").join("settings.json"))
    }

    /// Load preferences from disk.
    pub fn load() -> Option<Self> {
        let path = Self::prefs_file_path()?;
        let contents = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save preferences to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = match Self::prefs_file_path() {
            Some(p) => p,
            None => return Ok(()), // Silently skip if no data dir
        };

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)
    }
}
