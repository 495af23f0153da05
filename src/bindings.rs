//! Rebindable gameplay keys
//!
//! Keys are stored by name ("ArrowLeft", "Escape", "b", ...), the same
//! names `platform::input::key_name` produces from window events.

use serde::{Deserialize, Serialize};

/// Actions the player can rebind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    BossKey,
    Jetpack,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::BossKey,
        Action::Jetpack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::MoveLeft => "Move Left",
            Action::MoveRight => "Move Right",
            Action::BossKey => "Boss Key",
            Action::Jetpack => "Jetpack Key",
        }
    }
}

/// Current key for each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub move_left: String,
    pub move_right: String,
    pub boss_key: String,
    pub jetpack: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: "ArrowLeft".to_string(),
            move_right: "ArrowRight".to_string(),
            boss_key: "b".to_string(),
            jetpack: "j".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn key_for(&self, action: Action) -> &str {
        match action {
            Action::MoveLeft => &self.move_left,
            Action::MoveRight => &self.move_right,
            Action::BossKey => &self.boss_key,
            Action::Jetpack => &self.jetpack,
        }
    }

    fn slot_mut(&mut self, action: Action) -> &mut String {
        match action {
            Action::MoveLeft => &mut self.move_left,
            Action::MoveRight => &mut self.move_right,
            Action::BossKey => &mut self.boss_key,
            Action::Jetpack => &mut self.jetpack,
        }
    }

    /// Which action, if any, a key triggers
    pub fn action_for(&self, key: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.key_for(action) == key)
    }

    /// Every action has a key and no two actions share one
    pub fn is_unique(&self) -> bool {
        let keys = Action::ALL.map(|action| self.key_for(action));
        keys.iter().enumerate().all(|(i, key)| {
            !key.is_empty() && !keys[i + 1..].contains(key)
        })
    }

    /// These bindings, or the defaults if they are not unique
    pub fn validated(self) -> Self {
        if self.is_unique() {
            self
        } else {
            log::warn!("Conflicting key bindings {:?}, using defaults", self);
            Self::default()
        }
    }

    /// Bind `key` to `action`
    ///
    /// If another action already uses `key` it takes over the old key of
    /// `action`, so every key maps to at most one action.
    pub fn rebind(&mut self, action: Action, key: &str) {
        let old = self.key_for(action).to_string();
        if let Some(other) = self.action_for(key) {
            if other != action {
                *self.slot_mut(other) = old;
            }
        }
        *self.slot_mut(action) = key.to_string();
        log::info!("Bound {} to {}", action.label(), key);
    }
}
