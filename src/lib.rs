//! Robo Jump - a vertical-scrolling bird platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, collisions, scrolling, spawning)
//! - `ui`: Screen state machine (menus, options, pause, boss key)
//! - `renderer`: wgpu rendering of colored primitives and bitmap text
//! - `platform`: Window key names and data directory resolution
//! - `persistence`: JSON save slot with versioned envelope
//! - `leaderboard`: Flat-file top scores
//! - `tuning`: Data-driven difficulty curve

pub mod bindings;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use bindings::{Action, KeyBindings};
pub use leaderboard::Leaderboard;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Distances are in screen pixels (origin top-left, y grows downward) and
/// velocities are per simulation tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 640.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity applied on landing (negative = up)
    pub const JUMP_VELOCITY: f32 = -17.0;
    /// Horizontal speed while a move key is held
    pub const HORIZONTAL_SPEED: f32 = 7.0;
    /// Constant vertical velocity while the jetpack burns
    pub const JETPACK_VELOCITY: f32 = -15.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 47.0;
    pub const PLAYER_HEIGHT: f32 = 49.0;
    pub const PLAYER_START_X: f32 = 240.0;
    pub const PLAYER_START_Y: f32 = 480.0;

    /// Platform tiles
    pub const TILE_WIDTH: f32 = 102.0;
    pub const TILE_HEIGHT: f32 = 24.0;

    /// Enemies share the player's width and the tile's height
    pub const ENEMY_WIDTH: f32 = PLAYER_WIDTH;
    pub const ENEMY_HEIGHT: f32 = TILE_HEIGHT;
    pub const ENEMY_SPEED: f32 = 1.0;

    /// Jetpack pickup size
    pub const PICKUP_SIZE: f32 = 28.0;

    /// Once the player rises above this line the world scrolls instead
    pub const SCROLL_THRESHOLD: f32 = 244.0;

    /// Main menu decoration
    pub const MENU_BIRD_X: f32 = 96.0;
    pub const MENU_BIRD_Y: f32 = 431.0;
    pub const MENU_TILE_X: f32 = SCREEN_WIDTH / 4.0 - 50.0;
    pub const MENU_TILE_Y: f32 = PLAYER_START_Y + TILE_HEIGHT;
}

/// Wrap a horizontal position around the screen edges
///
/// Leaving past the right edge re-enters at the left and vice versa.
#[inline]
pub fn wrap_x(x: f32) -> f32 {
    if x >= consts::SCREEN_WIDTH {
        1.0
    } else if x <= 0.0 {
        consts::SCREEN_WIDTH - 1.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_edges() {
        assert_eq!(wrap_x(consts::SCREEN_WIDTH), 1.0);
        assert_eq!(wrap_x(600.0), 1.0);
        assert_eq!(wrap_x(0.0), consts::SCREEN_WIDTH - 1.0);
        assert_eq!(wrap_x(-5.0), consts::SCREEN_WIDTH - 1.0);
        assert_eq!(wrap_x(120.5), 120.5);
    }

    proptest! {
        #[test]
        fn wrap_stays_on_screen(x in -1000.0f32..1000.0) {
            let wrapped = wrap_x(x);
            prop_assert!(wrapped > 0.0 && wrapped < consts::SCREEN_WIDTH);
        }
    }
}
