use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Icon class the theme toggle shows for this theme.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => "fa-moon",
            Self::Light => "fa-sun",
        }
    }
}

/// The only state that survives a restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

impl Preferences {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(PREFERENCES_FILE)
    }

    #[cfg(feature = "desktop")]
    pub fn get_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
        use tauri::Manager;

        app.path()
            .app_data_dir()
            .map(|dir| Self::path_in(&dir))
            .map_err(|e| e.to_string())
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("[Preferences] Failed to parse preferences: {}, returning defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("[Preferences] Failed to read file: {}, returning defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let tmp_path = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        // Write to tmp, then rename, so a crash never leaves a half-written file.
        fs::write(&tmp_path, json).map_err(|e| e.to_string())?;
        fs::rename(tmp_path, path).map_err(|e| e.to_string())?;

        Ok(())
    }

    /// Saves when a location is known. Failures are logged and the
    /// in-memory value stands for this session. Returns true if written.
    pub fn save_or_warn(&self, path: Result<PathBuf, String>) -> bool {
        let path = match path {
            Ok(path) => path,
            Err(e) => {
                warn!("[Preferences] No app data dir: {}", e);
                return false;
            }
        };
        match self.save(&path) {
            Ok(()) => true,
            Err(e) => {
                warn!("[Preferences] Failed to save: {}", e);
                false
            }
        }
    }

    /// Flips the theme and returns the new value.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}
