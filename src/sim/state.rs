//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::lands_on;
use super::rect::Rect;
use super::spawn;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Dropped below the bottom of the screen
    FellOff,
    /// Touched an enemy without the jetpack
    HitEnemy,
}

/// Direction the bird sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    #[serde(default)]
    pub facing: Facing,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Bounce pad
    Platform,
    /// Moving hazard
    Enemy,
}

/// A platform or enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub kind: TileKind,
    pub rect: Rect,
}

impl Tile {
    pub fn platform(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            kind: TileKind::Platform,
            rect: Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT),
        }
    }

    pub fn enemy(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            kind: TileKind::Enemy,
            rect: Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
        }
    }

    /// Advance an enemy one tick, wrapping back in from the left edge
    pub fn patrol(&mut self) {
        if self.kind != TileKind::Enemy {
            return;
        }
        if self.rect.pos.x > SCREEN_WIDTH {
            self.rect.pos.x = -ENEMY_WIDTH;
        } else {
            self.rect.pos.x += ENEMY_SPEED;
        }
    }
}

/// A jetpack lying on a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub rect: Rect,
}

/// Jetpack inventory and burn state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Jetpack {
    /// Collected, not yet deployed
    pub charges: u8,
    /// Ticks of burn remaining (0 = off)
    pub active_ticks: u32,
}

impl Jetpack {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_ticks > 0
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Landed { tile_id: u32 },
    JetpackCollected { charges: u8 },
    JetpackDeployed,
    JetpackExpired,
    DifficultyUp { spacing: f32 },
    GameOver { reason: EndReason },
}

/// RNG state wrapper for serialization
///
/// Every draw site derives a fresh generator from the seed and a running
/// draw counter, so a saved run continues the same sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let key = self.seed ^ self.draws.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.draws += 1;
        Pcg32::seed_from_u64(key)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Set when `phase` becomes `GameOver`
    #[serde(default)]
    pub end_reason: Option<EndReason>,
    pub player: Player,
    /// Platforms and enemies (sorted by id for determinism)
    pub tiles: Vec<Tile>,
    /// Jetpack pickups (sorted by id for determinism)
    pub pickups: Vec<Pickup>,
    pub jetpack: Jetpack,
    /// Total scroll distance, whole pixels
    pub score: u64,
    /// Fractional scroll not yet credited to `score`
    #[serde(default)]
    pub score_carry: f32,
    /// Current vertical distance between spawned rows
    pub spacing: f32,
    /// Score at which the next difficulty increase happens
    pub difficulty_level: u64,
    /// Screen y of the most recently spawned row
    pub frontier_y: f32,
    /// Whether the most recent row was an enemy
    #[serde(default)]
    pub last_row_enemy: bool,
    #[serde(default)]
    pub tuning: Tuning,
    /// Events from the most recent ticks (drained by the UI)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with a custom difficulty curve
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let start = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        let start_tile_y = PLAYER_START_Y + PLAYER_HEIGHT + TILE_HEIGHT;

        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            end_reason: None,
            player: Player::new(start),
            tiles: Vec::new(),
            pickups: Vec::new(),
            jetpack: Jetpack::default(),
            score: 0,
            score_carry: 0.0,
            spacing: tuning.initial_spacing,
            difficulty_level: tuning.difficulty_step,
            frontier_y: start_tile_y,
            last_row_enemy: false,
            tuning,
            events: Vec::new(),
            next_id: 1,
        };

        // Start tile centered under the bird
        let id = state.next_entity_id();
        let x = PLAYER_START_X - (TILE_WIDTH - PLAYER_WIDTH) / 2.0;
        state.tiles.push(Tile::platform(id, x, start_tile_y));

        spawn::fill_initial_rows(&mut state);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Credit scrolled distance to the score
    ///
    /// Fractions accumulate so that no scrolled pixel is lost.
    pub fn add_score(&mut self, distance: f32) {
        if distance <= 0.0 {
            return;
        }
        let total = self.score_carry + distance;
        let whole = total.floor();
        self.score += whole as u64;
        self.score_carry = total - whole;
    }

    /// Mark the run as over
    pub fn end(&mut self, reason: EndReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
    }

    /// Take the accumulated events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.tiles.sort_by_key(|t| t.id);
        self.pickups.sort_by_key(|p| p.id);
    }

    /// Sanity checks for state coming from disk
    pub fn validate(&self) -> Result<(), String> {
        if self.phase == GamePhase::GameOver {
            return Err("run already ended".to_string());
        }
        if !self.player.pos.is_finite() || !self.player.vel.is_finite() {
            return Err("player position is not finite".to_string());
        }
        if !(0.0..1.0).contains(&self.score_carry) {
            return Err(format!("score carry out of range: {}", self.score_carry));
        }
        if self.tuning != self.tuning.clone().sanitized() {
            return Err("tuning out of range".to_string());
        }
        let spacing_range = self.tuning.initial_spacing..=self.tuning.max_spacing;
        if !spacing_range.contains(&self.spacing) {
            return Err(format!("row spacing out of range: {}", self.spacing));
        }
        if !self.frontier_y.is_finite() || self.frontier_y > SCREEN_HEIGHT {
            return Err(format!("spawn frontier out of range: {}", self.frontier_y));
        }
        for tile in &self.tiles {
            if !tile.rect.pos.is_finite() {
                return Err(format!("tile {} position is not finite", tile.id));
            }
            if tile.id >= self.next_id {
                return Err(format!("tile {} id beyond allocator", tile.id));
            }
        }
        for pickup in &self.pickups {
            if pickup.id >= self.next_id {
                return Err(format!("pickup {} id beyond allocator", pickup.id));
            }
        }
        Ok(())
    }
}

/// The bird bouncing on the main menu
#[derive(Debug, Clone)]
pub struct MenuBird {
    pub pos: Vec2,
    pub vel_y: f32,
    pub tile: Rect,
}

impl Default for MenuBird {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBird {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(MENU_BIRD_X, MENU_BIRD_Y),
            vel_y: JUMP_VELOCITY,
            tile: Rect::new(MENU_TILE_X, MENU_TILE_Y, TILE_WIDTH, TILE_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// Gravity step, bouncing whenever it meets its tile
    pub fn tick(&mut self) {
        self.vel_y += GRAVITY;

        if lands_on(&self.rect(), self.vel_y, &self.tile) {
            self.pos.y = self.tile.top() - PLAYER_HEIGHT;
            self.vel_y = JUMP_VELOCITY;
        } else {
            self.pos.y += self.vel_y;
        }
    }
}
