//! Data directory resolution
//!
//! Lookup order:
//! 1. `ROBO_JUMP_DATA_DIR` environment variable
//! 2. Platform data directory (e.g. `~/.local/share/robo-jump`)
//! 3. Current working directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ROBO_JUMP_DATA_DIR";

pub const LEADERBOARD_FILE: &str = "scores.txt";
pub const SAVE_FILE: &str = "game_save.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Directory holding every file the game writes
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Pick the directory per the lookup order above
    pub fn resolve() -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Self::new(dir);
        }
        match ProjectDirs::from("", "", "robo-jump") {
            Some(dirs) => Self::new(dirs.data_dir()),
            None => {
                log::warn!("No platform data directory, using the working directory");
                Self::new(".")
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.root.join(LEADERBOARD_FILE)
    }

    pub fn save_path(&self) -> PathBuf {
        self.root.join(SAVE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// Make sure the directory exists
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let dir = DataDir::new("/tmp/rj");
        assert_eq!(dir.leaderboard_path(), PathBuf::from("/tmp/rj/scores.txt"));
        assert_eq!(dir.save_path(), PathBuf::from("/tmp/rj/game_save.json"));
        assert_eq!(dir.settings_path(), PathBuf::from("/tmp/rj/settings.json"));
    }

    #[test]
    fn test_ensure_creates() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path().join("a").join("b"));
        dir.ensure().unwrap();
        assert!(dir.root().is_dir());
    }
}
