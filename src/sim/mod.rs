//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{LandingResult, check_landing, lands_on, overlaps};
pub use rect::Rect;
pub use spawn::{fill_rows, spawn_row};
pub use state::{
    EndReason, Facing, GameEvent, GamePhase, GameState, Jetpack, MenuBird, Pickup, Player,
    RngState, Tile, TileKind,
};
pub use tick::{TickInput, tick};
