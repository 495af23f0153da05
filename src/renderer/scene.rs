//! Frame assembly
//!
//! Turns the session into one triangle list in game pixels. Nothing here
//! touches the GPU, so every screen can be checked in tests.

use glam::Vec2;

use super::shapes::{circle, fit_scale, frame, rect, text, text_centered, text_height, text_width};
use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{Facing, GamePhase, GameState, Rect, TileKind};
use crate::ui::{Button, Screen, Session, buttons};

const CENTER_X: f32 = SCREEN_WIDTH / 2.0;
const TITLE_SCALE: f32 = 5.0;
const BUTTON_TEXT_SCALE: f32 = 3.0;

/// Build the full frame for the current session state
pub fn build(session: &Session) -> Vec<Vertex> {
    let mut v = Vec::with_capacity(4096);

    if session.boss_screen {
        work_screen(&mut v);
        return v;
    }

    v.extend(rect(&screen_rect(), colors::BACKGROUND));

    match &session.screen {
        Screen::MainMenu => {
            v.extend(text_centered("ROBO JUMP", CENTER_X, 60.0, TITLE_SCALE, colors::TEXT));
            v.extend(platform(&session.menu_bird.tile));
            bird(&mut v, &session.menu_bird.rect(), Facing::Right, false);
            if let Some(best) = session.leaderboard.top_score() {
                v.extend(text_centered(
                    &format!("Best: {}", best),
                    CENTER_X,
                    392.0,
                    2.0,
                    colors::TEXT,
                ));
            }
        }
        Screen::Playing => {
            if let Some(game) = &session.game {
                world(&mut v, game);
                hud(&mut v, game, session.settings.player_name.as_str());
                if game.phase == GamePhase::Paused {
                    v.extend(rect(&screen_rect(), colors::OVERLAY));
                    v.extend(text_centered(
                        "Paused",
                        CENTER_X,
                        150.0,
                        TITLE_SCALE,
                        colors::TEXT_LIGHT,
                    ));
                }
            }
        }
        Screen::Options => {
            v.extend(text_centered("Options", CENTER_X, 60.0, TITLE_SCALE, colors::TEXT));
            v.extend(text_centered(
                "Pick an action, then press a key",
                CENTER_X,
                120.0,
                2.0,
                colors::TEXT,
            ));
        }
        Screen::Leaderboard => {
            v.extend(text_centered("Leaderboard", CENTER_X, 60.0, TITLE_SCALE, colors::TEXT));
            if session.leaderboard.is_empty() {
                v.extend(text_centered("No scores yet", CENTER_X, 200.0, 3.0, colors::TEXT));
            }
            for (i, entry) in session.leaderboard.entries.iter().enumerate() {
                let y = 160.0 + i as f32 * 60.0;
                v.extend(text(
                    &format!("{}. {}", i + 1, entry.name),
                    Vec2::new(40.0, y),
                    3.0,
                    colors::TEXT,
                ));
                let score = entry.score.to_string();
                let w = text_width(&score, 3.0);
                v.extend(text(&score, Vec2::new(SCREEN_WIDTH - 40.0 - w, y), 3.0, colors::TEXT));
            }
        }
        Screen::GameOver(summary) => {
            v.extend(text_centered("Game Over", CENTER_X, 60.0, TITLE_SCALE, colors::TEXT));
            let lines = [
                format!("Your score: {}", summary.score),
                format!("High score: {}", summary.high_score),
                format!("Your name: {}", summary.name),
            ];
            for (i, line) in lines.iter().enumerate() {
                let y = 150.0 + i as f32 * 50.0;
                let scale = fit_scale(line, SCREEN_WIDTH - 40.0, 3.0);
                v.extend(text_centered(line, CENTER_X, y, scale, colors::TEXT));
            }
            if let Some(rank) = summary.rank {
                v.extend(text_centered(
                    &format!("New high score #{}!", rank),
                    CENTER_X,
                    320.0,
                    2.0,
                    colors::TEXT,
                ));
            }
        }
    }

    for (i, button) in buttons(session).iter().enumerate() {
        draw_button(&mut v, button, i == session.focus);
    }

    if let Some(status) = &session.status {
        let scale = fit_scale(&status.text, SCREEN_WIDTH - 20.0, 2.0);
        let bar = Rect::new(0.0, SCREEN_HEIGHT - 40.0, SCREEN_WIDTH, 40.0);
        v.extend(rect(&bar, colors::STATUS));
        v.extend(text_centered(
            &status.text,
            CENTER_X,
            bar.center().y - text_height(scale) / 2.0,
            scale,
            colors::TEXT_LIGHT,
        ));
    }

    v
}

fn screen_rect() -> Rect {
    Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT)
}

fn draw_button(v: &mut Vec<Vertex>, button: &Button, focused: bool) {
    let fill = if focused {
        colors::BUTTON_FOCUS
    } else {
        colors::BUTTON
    };
    v.extend(rect(&button.rect, fill));

    if button.label.is_empty() {
        // Pause icon: two bars
        let r = &button.rect;
        let bar_w = r.size.x / 4.0;
        let inset = r.size.y / 5.0;
        for x in [r.left() + bar_w * 0.75, r.right() - bar_w * 1.75] {
            v.extend(rect(
                &Rect::new(x, r.top() + inset, bar_w, r.size.y - inset * 2.0),
                colors::TEXT_LIGHT,
            ));
        }
        return;
    }

    if focused {
        v.extend(frame(&button.rect, 3.0, colors::TEXT_LIGHT));
    }
    let scale = fit_scale(&button.label, button.rect.size.x - 16.0, BUTTON_TEXT_SCALE);
    let y = button.rect.center().y - text_height(scale) / 2.0;
    v.extend(text_centered(
        &button.label,
        button.rect.center().x,
        y,
        scale,
        colors::TEXT_LIGHT,
    ));
}

fn platform(r: &Rect) -> Vec<Vertex> {
    let mut v = rect(r, colors::PLATFORM);
    v.extend(frame(r, 3.0, colors::PLATFORM_EDGE));
    v
}

fn enemy(v: &mut Vec<Vertex>, r: &Rect) {
    v.extend(rect(r, colors::ENEMY));
    let eye_y = r.top() + r.size.y * 0.4;
    for x in [r.left() + r.size.x * 0.3, r.left() + r.size.x * 0.7] {
        v.extend(circle(Vec2::new(x, eye_y), 4.0, colors::ENEMY_EYE, 10));
    }
}

/// Boxy bird with a beak on the facing side
fn bird(v: &mut Vec<Vertex>, r: &Rect, facing: Facing, flying: bool) {
    let (w, h) = (r.size.x, r.size.y);

    if flying {
        // Jetpack on the back with a flame underneath
        let pack_x = match facing {
            Facing::Right => r.left() - 8.0,
            Facing::Left => r.right() - 4.0,
        };
        v.extend(rect(&Rect::new(pack_x, r.top() + 10.0, 12.0, 24.0), colors::JETPACK));
        v.extend(rect(&Rect::new(pack_x + 2.0, r.top() + 34.0, 8.0, 14.0), colors::FLAME));
    }

    v.extend(rect(&Rect::new(r.left(), r.top() + h * 0.2, w, h * 0.8), colors::BIRD));
    v.extend(rect(&Rect::new(r.left() + w * 0.2, r.top(), w * 0.6, h * 0.3), colors::BIRD));

    let (eye_x, beak_x, wing_x) = match facing {
        Facing::Right => (r.left() + w * 0.65, r.right(), r.left() + w * 0.1),
        Facing::Left => (r.left() + w * 0.35, r.left() - 10.0, r.left() + w * 0.5),
    };
    v.extend(rect(&Rect::new(wing_x, r.top() + h * 0.45, w * 0.4, h * 0.3), colors::BIRD_WING));
    v.extend(circle(Vec2::new(eye_x, r.top() + h * 0.25), 4.0, colors::EYE, 12));
    v.extend(rect(&Rect::new(beak_x, r.top() + h * 0.3, 10.0, 8.0), colors::BEAK));
}

fn world(v: &mut Vec<Vertex>, game: &GameState) {
    for tile in &game.tiles {
        match tile.kind {
            TileKind::Platform => v.extend(platform(&tile.rect)),
            TileKind::Enemy => enemy(v, &tile.rect),
        }
    }

    for pickup in &game.pickups {
        let r = &pickup.rect;
        v.extend(rect(r, colors::JETPACK));
        v.extend(circle(r.center(), r.size.x * 0.25, colors::FLAME, 12));
    }

    bird(
        v,
        &game.player.rect(),
        game.player.facing,
        game.jetpack.is_active(),
    );
}

fn hud(v: &mut Vec<Vertex>, game: &GameState, name: &str) {
    v.extend(text(
        &format!("Score: {}", game.score),
        Vec2::new(10.0, 10.0),
        3.0,
        colors::TEXT,
    ));
    v.extend(text(name, Vec2::new(10.0, 40.0), 2.0, colors::TEXT));

    // One pack icon per stored charge
    for i in 0..game.jetpack.charges {
        let r = Rect::new(10.0 + i as f32 * 20.0, 62.0, 14.0, 20.0);
        v.extend(rect(&r, colors::JETPACK));
    }
    if game.jetpack.is_active() {
        let secs = game.jetpack.active_ticks.div_ceil(60);
        v.extend(text(
            &format!("Jetpack {}", secs),
            Vec2::new(10.0, 88.0),
            2.0,
            colors::TEXT,
        ));
    }
}

/// FPS readout in the top-right corner, below the pause button
pub fn fps_counter(fps: u32) -> Vec<Vertex> {
    let label = format!("{} FPS", fps);
    let w = text_width(&label, 2.0);
    text(&label, Vec2::new(SCREEN_WIDTH - 10.0 - w, 48.0), 2.0, colors::TEXT)
}

/// Stand-in work screen for the boss key
fn work_screen(v: &mut Vec<Vertex>) {
    v.extend(rect(&screen_rect(), colors::WORK_BG));
    v.extend(rect(&Rect::new(0.0, 0.0, SCREEN_WIDTH, 40.0), colors::WORK_BAR));
    v.extend(text(
        "File Manager",
        Vec2::new(12.0, 12.0),
        2.0,
        colors::TEXT_LIGHT,
    ));

    let files = [
        ("quarterly_report.xlsx", "48 KB"),
        ("budget_2024.xlsx", "112 KB"),
        ("meeting_notes.docx", "16 KB"),
        ("roadmap.pdf", "2.1 MB"),
        ("invoices", "-"),
        ("timesheet.csv", "4 KB"),
        ("presentation.pptx", "8.4 MB"),
    ];
    for (i, (name, size)) in files.iter().enumerate() {
        let y = 60.0 + i as f32 * 36.0;
        if i % 2 == 0 {
            v.extend(rect(&Rect::new(0.0, y - 8.0, SCREEN_WIDTH, 36.0), colors::WORK_ROW));
        }
        v.extend(text(name, Vec2::new(16.0, y), 2.0, colors::TEXT));
        let w = text_width(size, 2.0);
        v.extend(text(size, Vec2::new(SCREEN_WIDTH - 16.0 - w, y), 2.0, colors::TEXT));
    }
}
