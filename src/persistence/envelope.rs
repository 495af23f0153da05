//! Versioned save envelope
//!
//! Besides the run itself the save carries the player name and key bindings,
//! so resuming restores the controls the run was played with.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::error::PersistError;
use crate::bindings::KeyBindings;
use crate::sim::GameState;

/// Bump when the saved layout changes incompatibly
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    /// Unix timestamp (seconds)
    pub saved_at: u64,
    pub player_name: String,
    pub bindings: KeyBindings,
    pub state: GameState,
}

impl SaveEnvelope {
    pub fn new(player_name: &str, bindings: &KeyBindings, state: &GameState) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            version: SAVE_VERSION,
            saved_at,
            player_name: player_name.to_string(),
            bindings: bindings.clone(),
            state: state.clone(),
        }
    }

    /// Reject saves from other versions or with nonsensical state
    pub fn validate(&self) -> Result<(), PersistError> {
        if self.version != SAVE_VERSION {
            return Err(PersistError::Version {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        self.state.validate().map_err(PersistError::Invalid)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let envelope: SaveEnvelope = serde_json::from_str(json)?;
        envelope.validate()?;
        Ok(envelope)
    }
}
