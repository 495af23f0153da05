//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{check_landing, overlaps};
use super::spawn;
use super::state::{EndReason, Facing, GameEvent, GamePhase, GameState, TileKind};
use crate::consts::*;
use crate::wrap_x;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-left key held
    pub left: bool,
    /// Move-right key held
    pub right: bool,
    /// Light a stored jetpack (one-shot)
    pub deploy_jetpack: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    apply_input(state, input);
    integrate(state);
    scroll(state);

    for tile in &mut state.tiles {
        tile.patrol();
    }

    check_hazards(state);
    collect_pickups(state);
    cull(state);
    burn_jetpack(state);

    if state.player.pos.y >= SCREEN_HEIGHT {
        state.end(EndReason::FellOff);
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let dir = input.right as i32 - input.left as i32;
    state.player.vel.x = dir as f32 * HORIZONTAL_SPEED;
    match dir {
        d if d < 0 => state.player.facing = Facing::Left,
        d if d > 0 => state.player.facing = Facing::Right,
        _ => {}
    }

    let jetpack = &mut state.jetpack;
    if input.deploy_jetpack && jetpack.charges > 0 && !jetpack.is_active() {
        jetpack.charges -= 1;
        jetpack.active_ticks = state.tuning.jetpack_duration_ticks;
        log::debug!("Jetpack deployed ({} left)", jetpack.charges);
        state.events.push(GameEvent::JetpackDeployed);
    }
}

/// Gravity, jetpack thrust, platform landing and horizontal wrap
fn integrate(state: &mut GameState) {
    let jetpack_on = state.jetpack.is_active();

    state.player.vel.y += GRAVITY;
    if jetpack_on {
        state.player.vel.y = JETPACK_VELOCITY;
    }

    state.player.pos.x = wrap_x(state.player.pos.x + state.player.vel.x);

    // Nearest platform the feet will reach this step
    let landing = if jetpack_on {
        None
    } else {
        let player_rect = state.player.rect();
        let vel_y = state.player.vel.y;
        state
            .tiles
            .iter()
            .filter(|t| t.kind == TileKind::Platform)
            .filter_map(|t| {
                let result = check_landing(&player_rect, vel_y, &t.rect);
                result.hit.then_some((result.gap, t.id, t.rect.top()))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
    };

    match landing {
        Some((_, tile_id, top)) => {
            state.player.pos.y = top - PLAYER_HEIGHT;
            state.player.vel.y = JUMP_VELOCITY;
            state.events.push(GameEvent::Landed { tile_id });
        }
        None => state.player.pos.y += state.player.vel.y,
    }
}

/// Count down a burning jetpack once the tick's hazards have been checked
fn burn_jetpack(state: &mut GameState) {
    if !state.jetpack.is_active() {
        return;
    }
    state.jetpack.active_ticks -= 1;
    if state.jetpack.active_ticks == 0 {
        log::debug!("Jetpack burned out");
        state.events.push(GameEvent::JetpackExpired);
    }
}

/// Keep the player below the threshold by moving the world instead
fn scroll(state: &mut GameState) {
    let rising = state.player.vel.y <= 0.0 || state.jetpack.is_active();
    if state.player.pos.y >= SCROLL_THRESHOLD || !rising {
        return;
    }

    let distance = SCROLL_THRESHOLD - state.player.pos.y;
    state.player.pos.y = SCROLL_THRESHOLD;

    for tile in &mut state.tiles {
        tile.rect = tile.rect.shifted(distance);
    }
    for pickup in &mut state.pickups {
        pickup.rect = pickup.rect.shifted(distance);
    }
    state.frontier_y += distance;

    state.add_score(distance);
    spawn::fill_rows(state);
}

fn check_hazards(state: &mut GameState) {
    if state.jetpack.is_active() {
        return;
    }

    let player_rect = state.player.rect();
    let hit = state
        .tiles
        .iter()
        .any(|t| t.kind == TileKind::Enemy && overlaps(&player_rect, &t.rect));
    if hit {
        state.end(EndReason::HitEnemy);
    }
}

fn collect_pickups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let max = state.tuning.max_jetpack_charges;
    let before = state.pickups.len();

    state.pickups.retain(|p| !overlaps(&player_rect, &p.rect));

    let collected = before - state.pickups.len();
    for _ in 0..collected {
        state.jetpack.charges = (state.jetpack.charges + 1).min(max);
        state.events.push(GameEvent::JetpackCollected {
            charges: state.jetpack.charges,
        });
    }
}

/// Drop anything that scrolled off the bottom
fn cull(state: &mut GameState) {
    state.tiles.retain(|t| t.rect.top() < SCREEN_HEIGHT);
    state.pickups.retain(|p| p.rect.top() < SCREEN_HEIGHT);
}
