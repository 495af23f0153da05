//! Collision detection between the player and world rectangles
//!
//! Everything is an axis-aligned box. Platforms are one-way: the player only
//! lands on them from above while falling.

use super::rect::Rect;

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingResult {
    /// Whether the player will touch down this step
    pub hit: bool,
    /// Distance from the player's feet to the tile top before the step
    pub gap: f32,
}

impl LandingResult {
    pub fn miss() -> Self {
        Self { hit: false, gap: 0.0 }
    }
}

/// Solid contact between two boxes (enemies, pickups)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Predictive one-way platform check
///
/// The player lands when it overlaps the tile horizontally, its feet are at
/// or above the tile top, and one more step of `vel_y` would reach the top.
/// A rising player (`vel_y < 0`) can never satisfy both vertical conditions.
pub fn check_landing(player: &Rect, vel_y: f32, tile: &Rect) -> LandingResult {
    if !player.overlaps_x(tile) {
        return LandingResult::miss();
    }

    let feet = player.bottom();
    let top = tile.top();
    if feet <= top && feet + vel_y >= top {
        LandingResult {
            hit: true,
            gap: top - feet,
        }
    } else {
        LandingResult::miss()
    }
}

/// Convenience wrapper returning only the hit flag
#[inline]
pub fn lands_on(player: &Rect, vel_y: f32, tile: &Rect) -> bool {
    check_landing(player, vel_y, tile).hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn player_at(x: f32, y: f32) -> Rect {
        Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn tile_at(x: f32, y: f32) -> Rect {
        Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT)
    }

    #[test]
    fn test_landing_when_falling_onto_tile() {
        // Feet at 300, tile top at 305, falling 8/tick
        let player = player_at(100.0, 300.0 - PLAYER_HEIGHT);
        let tile = tile_at(80.0, 305.0);

        let result = check_landing(&player, 8.0, &tile);
        assert!(result.hit);
        assert!((result.gap - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_no_landing_when_rising() {
        let player = player_at(100.0, 300.0 - PLAYER_HEIGHT);
        let tile = tile_at(80.0, 305.0);
        assert!(!lands_on(&player, -8.0, &tile));
    }

    #[test]
    fn test_no_landing_from_below() {
        // Feet already below the tile top: passes through
        let player = player_at(100.0, 310.0 - PLAYER_HEIGHT);
        let tile = tile_at(80.0, 305.0);
        assert!(!lands_on(&player, 8.0, &tile));
    }

    #[test]
    fn test_no_landing_without_horizontal_overlap() {
        let player = player_at(300.0, 300.0 - PLAYER_HEIGHT);
        let tile = tile_at(80.0, 305.0);
        assert!(!lands_on(&player, 8.0, &tile));

        // Exactly touching the tile's right edge is not an overlap
        let player = player_at(80.0 + TILE_WIDTH, 300.0 - PLAYER_HEIGHT);
        assert!(!lands_on(&player, 8.0, &tile));
    }

    #[test]
    fn test_landing_too_far_above() {
        let player = player_at(100.0, 200.0 - PLAYER_HEIGHT);
        let tile = tile_at(80.0, 305.0);
        assert!(!lands_on(&player, 8.0, &tile));
    }

    #[test]
    fn test_enemy_overlap() {
        let player = player_at(100.0, 100.0);
        let enemy = Rect::new(120.0, 140.0, ENEMY_WIDTH, ENEMY_HEIGHT);
        assert!(overlaps(&player, &enemy));

        let far = Rect::new(300.0, 140.0, ENEMY_WIDTH, ENEMY_HEIGHT);
        assert!(!overlaps(&player, &far));
    }
}
