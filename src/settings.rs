//! Game settings and preferences
//!
//! Persisted separately from game saves as `settings.json`.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bindings::KeyBindings;
use crate::leaderboard::{DEFAULT_NAME, sanitize_name};
use crate::persistence::{PersistError, write_atomic};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded on the leaderboard
    pub player_name: String,
    /// Rebindable gameplay keys
    pub bindings: KeyBindings,
    /// Show FPS counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_NAME.to_string(),
            bindings: KeyBindings::default(),
            show_fps: false,
        }
    }
}

impl Settings {
    /// Set the player name (sanitized for the leaderboard)
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = sanitize_name(name);
    }

    /// Load settings, falling back to defaults on a missing or broken file
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(PersistError::NotFound(_)) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, PersistError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PersistError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.player_name = sanitize_name(&settings.player_name);
        settings.bindings = settings.bindings.validated();
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Action;

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.set_player_name("Jay");
        settings.bindings.rebind(Action::Jetpack, "Space");
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.player_name, "Jay");
        assert_eq!(loaded.bindings.jetpack, "Space");
    }

    #[test]
    fn test_corrupt_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(Settings::try_load(&path), Err(PersistError::Json(_))));
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_duplicate_bindings_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"player_name": "Ida", "bindings": {"move_left": "a", "move_right": "a", "boss_key": "b", "jetpack": "j"}}"#,
        )
        .unwrap();
        let loaded = Settings::load(&path);
        assert_eq!(loaded.player_name, "Ida");
        assert_eq!(loaded.bindings, KeyBindings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"player_name": "Ida"}"#).unwrap();
        let loaded = Settings::load(&path);
        assert_eq!(loaded.player_name, "Ida");
        assert_eq!(loaded.bindings, KeyBindings::default());
    }
}
