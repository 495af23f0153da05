//! Data-driven difficulty curve
//!
//! Stored inside `GameState` so a resumed run keeps the curve it started with.

use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, JUMP_VELOCITY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Vertical distance between rows at the start of a run
    pub initial_spacing: f32,
    /// Spacing added each time the difficulty level is crossed
    pub spacing_step: f32,
    /// Upper bound on row spacing
    pub max_spacing: f32,
    /// Score interval between difficulty increases
    pub difficulty_step: u64,
    /// Chance that a row spawns an enemy instead of a platform
    pub enemy_chance: f64,
    /// Chance that a platform carries a jetpack pickup
    pub jetpack_chance: f64,
    /// Ticks a deployed jetpack burns for
    pub jetpack_duration_ticks: u32,
    /// Jetpack charges the player can hold
    pub max_jetpack_charges: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_spacing: 50.0,
            spacing_step: 50.0,
            max_spacing: 220.0,
            difficulty_step: 1000,
            enemy_chance: 0.1,
            jetpack_chance: 0.03,
            jetpack_duration_ticks: 180,
            max_jetpack_charges: 3,
        }
    }
}

impl Tuning {
    /// Highest climb a single bounce can reach (v² / 2g)
    pub fn max_reach() -> f32 {
        JUMP_VELOCITY * JUMP_VELOCITY / (2.0 * GRAVITY)
    }

    /// Clamp values that would make the run unwinnable or the RNG panic
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let reach = Self::max_reach();
        if !self.initial_spacing.is_finite() {
            self.initial_spacing = defaults.initial_spacing;
        }
        if !self.max_spacing.is_finite() {
            self.max_spacing = defaults.max_spacing;
        }
        if !self.spacing_step.is_finite() {
            self.spacing_step = defaults.spacing_step;
        }
        if self.enemy_chance.is_nan() {
            self.enemy_chance = defaults.enemy_chance;
        }
        if self.jetpack_chance.is_nan() {
            self.jetpack_chance = defaults.jetpack_chance;
        }
        self.initial_spacing = self.initial_spacing.clamp(1.0, reach);
        self.max_spacing = self.max_spacing.clamp(self.initial_spacing, reach);
        self.spacing_step = self.spacing_step.max(0.0);
        self.difficulty_step = self.difficulty_step.max(1);
        self.enemy_chance = self.enemy_chance.clamp(0.0, 1.0);
        self.jetpack_chance = self.jetpack_chance.clamp(0.0, 1.0);
        self
    }
}
