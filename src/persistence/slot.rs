//! Single save slot on disk

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::envelope::SaveEnvelope;
use super::error::PersistError;

/// Write `contents` to a sibling temp file, then rename over `path`
///
/// A crash mid-write leaves the previous file intact.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

/// The one save slot used by Save Game / Saves
#[derive(Debug, Clone)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn save(&self, envelope: &SaveEnvelope) -> Result<(), PersistError> {
        let json = envelope.to_json()?;
        write_atomic(&self.path, &json)?;
        log::info!(
            "Game saved to {} (score {})",
            self.path.display(),
            envelope.state.score
        );
        Ok(())
    }

    pub fn load(&self) -> Result<SaveEnvelope, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PersistError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut envelope = SaveEnvelope::from_json(&json)?;
        envelope.state.normalize_order();
        log::info!(
            "Loaded save from {} (score {})",
            self.path.display(),
            envelope.state.score
        );
        Ok(envelope)
    }

    /// Remove the save; a missing file is not an error
    pub fn clear(&self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Saved game cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::KeyBindings;
    use crate::sim::GameState;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("game_save.json"));
        assert!(!slot.exists());

        let mut state = GameState::new(5);
        state.score = 1234;
        let envelope = SaveEnvelope::new("Kiwi", &KeyBindings::default(), &state);
        slot.save(&envelope).unwrap();
        assert!(slot.exists());
        assert!(!dir.path().join("game_save.tmp").exists());

        let loaded = slot.load().unwrap();
        assert_eq!(loaded.player_name, "Kiwi");
        assert_eq!(loaded.state.score, 1234);
    }

    #[test]
    fn test_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("nothing.json"));
        let err = slot.load().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_save.json");
        fs::write(&path, "{\"version\": 1, \"state\": ").unwrap();

        let err = SaveSlot::new(&path).load().unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_overwrite_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("nested").join("save.json"));

        let first = GameState::new(1);
        slot.save(&SaveEnvelope::new("a", &KeyBindings::default(), &first))
            .unwrap();
        let mut second = GameState::new(2);
        second.score = 9;
        slot.save(&SaveEnvelope::new("b", &KeyBindings::default(), &second))
            .unwrap();

        let loaded = slot.load().unwrap();
        assert_eq!(loaded.player_name, "b");
        assert_eq!(loaded.state.score, 9);

        slot.clear().unwrap();
        assert!(!slot.exists());
        // Clearing twice is fine
        slot.clear().unwrap();
    }
}
