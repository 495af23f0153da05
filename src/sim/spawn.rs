//! Endless row generation
//!
//! Rows are stacked `spacing` pixels apart above the spawn frontier. The
//! frontier scrolls with the world, and new rows are added whenever it drops
//! onto the visible screen, so there is always a row waiting above the top
//! edge.

use rand::Rng;

use super::state::{GameEvent, GameState, Pickup, Tile};
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Rightmost x a tile may spawn at
pub const TILE_MAX_X: f32 = SCREEN_WIDTH - TILE_WIDTH;

/// Rightmost x an enemy may spawn at
pub const ENEMY_MAX_X: f32 = SCREEN_WIDTH - ENEMY_WIDTH;

/// Spawn rows until the frontier sits above the top of the screen
pub fn fill_rows(state: &mut GameState) {
    while state.frontier_y > 0.0 {
        spawn_row(state);
    }
}

/// Initial screen fill: platforms only so the opening bounces are safe
pub fn fill_initial_rows(state: &mut GameState) {
    while state.frontier_y > 0.0 {
        spawn_row_with(state, false);
    }
}

/// Spawn the next row above the frontier
pub fn spawn_row(state: &mut GameState) {
    spawn_row_with(state, true);
}

fn spawn_row_with(state: &mut GameState, allow_enemies: bool) {
    raise_difficulty(state);

    let mut rng = state.rng_state.next_rng();
    let x = rng.random_range(0.0..=TILE_MAX_X).floor();
    let y = state.frontier_y - state.spacing;

    let enemy = allow_enemies
        && !state.last_row_enemy
        && rng.random_bool(state.tuning.enemy_chance);
    // An enemy row leaves a double gap. Once that no longer fits in a single
    // bounce the row keeps its platform and the enemy patrols the gap below.
    let replaces_row = enemy && state.spacing * 2.0 < Tuning::max_reach();

    let id = state.next_entity_id();
    if replaces_row {
        state.tiles.push(Tile::enemy(id, x, y));
    } else {
        state.tiles.push(Tile::platform(id, x, y));

        if rng.random_bool(state.tuning.jetpack_chance) {
            let pickup_id = state.next_entity_id();
            let px = x + (TILE_WIDTH - PICKUP_SIZE) / 2.0;
            state.pickups.push(Pickup {
                id: pickup_id,
                rect: Rect::new(px, y - PICKUP_SIZE, PICKUP_SIZE, PICKUP_SIZE),
            });
        }

        if enemy {
            let enemy_id = state.next_entity_id();
            let ex = rng.random_range(0.0..=ENEMY_MAX_X).floor();
            let gap = state.spacing - TILE_HEIGHT - ENEMY_HEIGHT;
            let ey = y + TILE_HEIGHT + gap / 2.0;
            state.tiles.push(Tile::enemy(enemy_id, ex, ey));
        }
    }

    state.last_row_enemy = enemy;
    state.frontier_y = y;
}

/// Widen spacing each time the score passes the current difficulty level
fn raise_difficulty(state: &mut GameState) {
    if state.score <= state.difficulty_level {
        return;
    }

    let tuning = &state.tuning;
    state.spacing = (state.spacing + tuning.spacing_step).min(tuning.max_spacing);
    state.difficulty_level = state.difficulty_level.saturating_add(tuning.difficulty_step);
    log::debug!(
        "Difficulty up: spacing {} next level {}",
        state.spacing,
        state.difficulty_level
    );
    state.events.push(GameEvent::DifficultyUp {
        spacing: state.spacing,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::TileKind;

    #[test]
    fn test_row_above_frontier() {
        let mut state = GameState::new(5);
        state.frontier_y = 100.0;
        let before = state.tiles.len() + state.pickups.len();

        spawn_row(&mut state);

        assert_eq!(state.frontier_y, 100.0 - state.spacing);
        assert!(state.tiles.len() + state.pickups.len() > before);
        let row = state.tiles.last().unwrap();
        assert_eq!(row.rect.top(), state.frontier_y);
        assert!(row.rect.left() >= 0.0 && row.rect.left() <= TILE_MAX_X);
    }

    #[test]
    fn test_fill_rows_reaches_top() {
        let mut state = GameState::new(11);
        state.frontier_y = 400.0;
        fill_rows(&mut state);
        assert!(state.frontier_y <= 0.0);
        assert!(state.frontier_y > -state.spacing);
    }

    #[test]
    fn test_difficulty_increases_spacing() {
        let mut state = GameState::new(8);
        let start_spacing = state.spacing;
        let level = state.difficulty_level;

        state.score = level + 1;
        state.frontier_y = 10.0;
        spawn_row(&mut state);

        assert_eq!(state.spacing, start_spacing + state.tuning.spacing_step);
        assert_eq!(state.difficulty_level, level + state.tuning.difficulty_step);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::DifficultyUp { .. }))
        );
    }

    #[test]
    fn test_spacing_capped() {
        let mut state = GameState::new(8);
        for _ in 0..50 {
            state.score = state.difficulty_level + 1;
            state.frontier_y = 10.0;
            spawn_row(&mut state);
        }
        assert_eq!(state.spacing, state.tuning.max_spacing);
    }

    #[test]
    fn test_no_consecutive_enemy_rows() {
        let tuning = Tuning {
            enemy_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(21, tuning);
        let first_new = state.tiles.len();
        for _ in 0..20 {
            state.frontier_y = 10.0;
            spawn_row(&mut state);
        }

        let kinds: Vec<TileKind> = state.tiles[first_new..].iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TileKind::Enemy));
        for pair in kinds.windows(2) {
            assert!(!(pair[0] == TileKind::Enemy && pair[1] == TileKind::Enemy));
        }
    }

    #[test]
    fn test_enemies_between_rows_at_max_spacing() {
        let tuning = Tuning {
            enemy_chance: 1.0,
            initial_spacing: 200.0,
            max_spacing: 200.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(4, tuning);
        let first_new = state.tiles.len();
        let mut row_tops = Vec::new();
        for _ in 0..10 {
            state.frontier_y = 10.0;
            spawn_row(&mut state);
            row_tops.push(state.frontier_y);
        }

        let new_tiles = &state.tiles[first_new..];
        let platforms: Vec<&Tile> = new_tiles
            .iter()
            .filter(|t| t.kind == TileKind::Platform)
            .collect();
        let enemies: Vec<&Tile> = new_tiles
            .iter()
            .filter(|t| t.kind == TileKind::Enemy)
            .collect();

        // Every row still has a platform to bounce on
        for top in &row_tops {
            assert!(platforms.iter().any(|p| p.rect.top() == *top));
        }
        assert!(!enemies.is_empty());
        for enemy in &enemies {
            assert!(enemy.rect.left() >= 0.0 && enemy.rect.left() <= ENEMY_MAX_X);
            assert!(new_tiles.iter().all(|t| t.id == enemy.id || !t.rect.overlaps(&enemy.rect)));
        }
    }

    #[test]
    fn test_enemies_keep_spawning_late_in_run() {
        let tuning = Tuning {
            enemy_chance: 0.5,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(77, tuning);
        state.score = 2500;
        state.spacing = state.tuning.max_spacing;
        state.difficulty_level = u64::MAX;
        let first_new = state.tiles.len();
        for _ in 0..40 {
            state.frontier_y = 10.0;
            spawn_row(&mut state);
        }

        assert_eq!(state.spacing, state.tuning.max_spacing);
        assert!(
            state.tiles[first_new..]
                .iter()
                .any(|t| t.kind == TileKind::Enemy)
        );
    }

    #[test]
    fn test_pickup_sits_on_platform() {
        let tuning = Tuning {
            jetpack_chance: 1.0,
            enemy_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(2, tuning);
        state.frontier_y = 300.0;
        spawn_row(&mut state);

        let tile = state.tiles.last().unwrap();
        let pickup = state.pickups.last().unwrap();
        assert_eq!(pickup.rect.bottom(), tile.rect.top());
        assert!(pickup.rect.overlaps_x(&tile.rect));
    }

    #[test]
    fn test_same_seed_same_rows() {
        let a = GameState::new(1234);
        let b = GameState::new(1234);
        let xa: Vec<f32> = a.tiles.iter().map(|t| t.rect.pos.x).collect();
        let xb: Vec<f32> = b.tiles.iter().map(|t| t.rect.pos.x).collect();
        assert_eq!(xa, xb);
    }
}
