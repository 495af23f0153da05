//! Persistence errors

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing saved at this path
    #[error("no save found at {}", .0.display())]
    NotFound(PathBuf),

    /// Written by an incompatible version
    #[error("unsupported save version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    /// Parsed, but the contents make no sense
    #[error("invalid save: {0}")]
    Invalid(String),
}

impl PersistError {
    /// Missing file rather than a damaged one
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistError::NotFound(_))
    }
}
