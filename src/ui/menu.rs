//! Button layouts for each screen
//!
//! Buttons live in game space (480×640, origin top-left) so the same
//! rectangles serve rendering, mouse hit-testing and keyboard focus.

use crate::bindings::Action;
use crate::consts::SCREEN_WIDTH;
use crate::sim::{GamePhase, Rect};

use super::session::{Screen, Session};

pub const BUTTON_WIDTH: f32 = 280.0;
pub const BUTTON_HEIGHT: f32 = 48.0;

/// Square pause icon in the top-right corner while playing
pub const PAUSE_ICON: f32 = 36.0;

/// Everything a button can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Play,
    Options,
    Leaderboard,
    Saves,
    /// Player name field on the main menu
    Name,
    Menu,
    Pause,
    Resume,
    SaveGame,
    Rebind(Action),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub label: String,
    pub rect: Rect,
}

impl Button {
    /// A standard button centered horizontally with its top at `y`
    fn centered(id: ButtonId, label: impl Into<String>, y: f32) -> Self {
        Self {
            id,
            label: label.into(),
            rect: Rect::new(
                (SCREEN_WIDTH - BUTTON_WIDTH) / 2.0,
                y,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
        }
    }
}

/// Buttons visible on the current screen, in keyboard focus order
pub fn buttons(session: &Session) -> Vec<Button> {
    if session.boss_screen {
        return Vec::new();
    }

    match &session.screen {
        Screen::MainMenu => {
            let name = match &session.name_edit {
                Some(buffer) => format!("Name: {}_", buffer),
                None => format!("Name: {}", session.settings.player_name),
            };
            vec![
                Button::centered(ButtonId::Play, "Play", 178.0),
                Button::centered(ButtonId::Options, "Options", 246.0),
                Button::centered(ButtonId::Leaderboard, "Leaderboard", 314.0),
                Button {
                    id: ButtonId::Name,
                    label: name,
                    rect: Rect::new(200.0, 430.0, 260.0, 40.0),
                },
                Button {
                    id: ButtonId::Saves,
                    label: "Saves".to_string(),
                    rect: Rect::new(20.0, 572.0, 140.0, 44.0),
                },
            ]
        }
        Screen::Playing => match session.game.as_ref().map(|g| g.phase) {
            Some(GamePhase::Paused) => vec![
                Button::centered(ButtonId::Resume, "Resume", 250.0),
                Button::centered(ButtonId::SaveGame, "Save Game", 320.0),
                Button::centered(ButtonId::Menu, "Menu", 390.0),
            ],
            Some(GamePhase::Playing) => vec![Button {
                id: ButtonId::Pause,
                label: String::new(),
                rect: Rect::new(SCREEN_WIDTH - PAUSE_ICON - 13.0, 4.0, PAUSE_ICON, PAUSE_ICON),
            }],
            _ => Vec::new(),
        },
        Screen::Options => {
            let mut list: Vec<Button> = Action::ALL
                .iter()
                .enumerate()
                .map(|(i, &action)| {
                    let label = if session.rebinding == Some(action) {
                        "Press the key".to_string()
                    } else {
                        format!(
                            "{}: {}",
                            action.label(),
                            session.settings.bindings.key_for(action)
                        )
                    };
                    let mut button =
                        Button::centered(ButtonId::Rebind(action), label, 160.0 + i as f32 * 80.0);
                    button.rect.pos.x = 40.0;
                    button.rect.size.x = SCREEN_WIDTH - 80.0;
                    button
                })
                .collect();
            list.push(Button::centered(ButtonId::Menu, "Menu", 523.0));
            list
        }
        Screen::Leaderboard => vec![Button::centered(ButtonId::Menu, "Menu", 523.0)],
        Screen::GameOver(_) => vec![
            Button::centered(ButtonId::Menu, "Menu", 394.0),
            Button::centered(ButtonId::Leaderboard, "Leaderboard", 474.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SCREEN_HEIGHT;
    use crate::platform::DataDir;

    fn session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(DataDir::new(dir.path()));
        (dir, session)
    }

    fn assert_on_screen(list: &[Button]) {
        for b in list {
            assert!(b.rect.left() >= 0.0 && b.rect.right() <= SCREEN_WIDTH, "{:?}", b.id);
            assert!(b.rect.top() >= 0.0 && b.rect.bottom() <= SCREEN_HEIGHT, "{:?}", b.id);
        }
        for (i, a) in list.iter().enumerate() {
            for b in &list[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect), "{:?} overlaps {:?}", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_main_menu_layout() {
        let (_dir, session) = session();
        let list = buttons(&session);
        let ids: Vec<ButtonId> = list.iter().map(|b| b.id).collect();
        assert_eq!(
            ids,
            vec![
                ButtonId::Play,
                ButtonId::Options,
                ButtonId::Leaderboard,
                ButtonId::Name,
                ButtonId::Saves
            ]
        );
        assert_on_screen(&list);
    }

    #[test]
    fn test_options_labels() {
        let (_dir, mut session) = session();
        session.screen = Screen::Options;
        let list = buttons(&session);
        assert_eq!(list.len(), Action::ALL.len() + 1);
        assert_eq!(list[0].label, "Move Left: ArrowLeft");
        assert_on_screen(&list);

        session.rebinding = Some(Action::BossKey);
        assert_eq!(buttons(&session)[2].label, "Press the key");
    }

    #[test]
    fn test_boss_screen_hides_buttons() {
        let (_dir, mut session) = session();
        session.boss_screen = true;
        assert!(buttons(&session).is_empty());
    }
}
