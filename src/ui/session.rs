//! Screen state machine
//!
//! `Session` owns everything outside the simulation: which screen is
//! showing, the persisted settings and leaderboard, the save slot and the
//! key state that becomes each tick's `TickInput`.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use super::menu::{ButtonId, buttons};
use crate::bindings::Action;
use crate::leaderboard::{Leaderboard, MAX_NAME_LEN};
use crate::persistence::{SaveEnvelope, SaveSlot};
use crate::platform::DataDir;
use crate::settings::Settings;
use crate::sim::{EndReason, GameEvent, GamePhase, GameState, MenuBird, TickInput, tick};

/// How long a status line stays up (ticks)
pub const STATUS_TICKS: u32 = 180;

pub const GAME_TITLE: &str = "Robo Jump";
pub const BOSS_TITLE: &str = "File Manager";

/// Outcome of a finished run, shown on the game over screen
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub score: u64,
    pub high_score: u64,
    pub name: String,
    /// Leaderboard position, if the run made it on
    pub rank: Option<usize>,
    pub reason: EndReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu,
    Playing,
    Options,
    Leaderboard,
    GameOver(RunSummary),
}

/// Transient message at the bottom of the screen
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub ticks_left: u32,
}

/// One-shot inputs collected between ticks
#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    deploy_jetpack: bool,
    pause: bool,
}

pub struct Session {
    pub screen: Screen,
    pub settings: Settings,
    pub leaderboard: Leaderboard,
    pub game: Option<GameState>,
    pub menu_bird: MenuBird,
    /// Index into the current screen's buttons
    pub focus: usize,
    /// Name being typed, while the name field is active
    pub name_edit: Option<String>,
    /// Action waiting for its new key
    pub rebinding: Option<Action>,
    /// Work screen shown by the boss key
    pub boss_screen: bool,
    pub status: Option<Status>,
    data: DataDir,
    slot: SaveSlot,
    held_left: bool,
    held_right: bool,
    pending: Pending,
}

impl Session {
    /// Load settings and high scores from `data`
    pub fn new(data: DataDir) -> Self {
        if let Err(e) = data.ensure() {
            log::warn!("Could not create {}: {}", data.root().display(), e);
        }

        let settings = Settings::load(&data.settings_path());
        let leaderboard = Leaderboard::load(&data.leaderboard_path()).unwrap_or_else(|e| {
            log::warn!("Could not read high scores: {}", e);
            Leaderboard::new()
        });
        let slot = SaveSlot::new(data.save_path());

        Self {
            screen: Screen::MainMenu,
            settings,
            leaderboard,
            game: None,
            menu_bird: MenuBird::new(),
            focus: 0,
            name_edit: None,
            rebinding: None,
            boss_screen: false,
            status: None,
            data,
            slot,
            held_left: false,
            held_right: false,
            pending: Pending::default(),
        }
    }

    /// Window title for the current state
    pub fn title(&self) -> &'static str {
        if self.boss_screen {
            BOSS_TITLE
        } else {
            GAME_TITLE
        }
    }

    pub fn is_paused(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|g| g.phase == GamePhase::Paused)
    }

    /// Pause a running game, e.g. when the window loses focus
    pub fn pause_if_playing(&mut self) {
        self.held_left = false;
        self.held_right = false;
        if self.game.as_ref().is_some_and(|g| g.phase == GamePhase::Playing) {
            self.pending.pause = true;
            log::info!("Auto-paused (window lost focus)");
        }
    }

    /// Show a message for a few seconds
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            ticks_left: STATUS_TICKS,
        });
    }

    /// Route a named key press or release
    pub fn handle_key(&mut self, key: &str, pressed: bool) {
        if !pressed {
            match self.settings.bindings.action_for(key) {
                Some(Action::MoveLeft) => self.held_left = false,
                Some(Action::MoveRight) => self.held_right = false,
                _ => {}
            }
            return;
        }

        if let Some(action) = self.rebinding.take() {
            if key == "Escape" {
                log::debug!("Rebinding {} cancelled", action.label());
            } else {
                self.settings.bindings.rebind(action, key);
                self.persist_settings();
            }
            return;
        }

        if self.name_edit.is_some() {
            self.edit_name(key);
            return;
        }

        if key == self.settings.bindings.boss_key {
            self.toggle_boss_screen();
            return;
        }
        if self.boss_screen {
            return;
        }

        if self.screen == Screen::Playing && !self.is_paused() {
            self.gameplay_key(key);
        } else {
            self.menu_key(key);
        }
    }

    fn gameplay_key(&mut self, key: &str) {
        match self.settings.bindings.action_for(key) {
            Some(Action::MoveLeft) => self.held_left = true,
            Some(Action::MoveRight) => self.held_right = true,
            Some(Action::Jetpack) => self.pending.deploy_jetpack = true,
            Some(Action::BossKey) => {}
            None => {
                if matches!(key, "Escape" | "p") {
                    self.pending.pause = true;
                }
            }
        }
    }

    fn menu_key(&mut self, key: &str) {
        let count = buttons(self).len();
        match key {
            "ArrowDown" | "Tab" if count > 0 => self.focus = (self.focus + 1) % count,
            "ArrowUp" if count > 0 => self.focus = (self.focus + count - 1) % count,
            "Enter" | "Space" => {
                if let Some(button) = buttons(self).get(self.focus) {
                    self.activate(button.id);
                }
            }
            "Escape" => match self.screen {
                Screen::Playing => self.pending.pause = true,
                Screen::MainMenu => {}
                _ => self.go_to_menu(),
            },
            _ => {}
        }
    }

    fn edit_name(&mut self, key: &str) {
        let Some(buffer) = self.name_edit.as_mut() else {
            return;
        };
        match key {
            "Enter" => self.commit_name(),
            "Escape" => self.name_edit = None,
            "Backspace" => {
                buffer.pop();
            }
            "Space" => {
                if buffer.chars().count() < MAX_NAME_LEN {
                    buffer.push(' ');
                }
            }
            _ => {
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if c != ':' && !c.is_control() && buffer.chars().count() < MAX_NAME_LEN {
                        buffer.push(c);
                    }
                }
            }
        }
    }

    fn commit_name(&mut self) {
        if let Some(name) = self.name_edit.take() {
            self.settings.set_player_name(&name);
            log::info!("Player name set to {}", self.settings.player_name);
            self.persist_settings();
        }
    }

    fn toggle_boss_screen(&mut self) {
        self.boss_screen = !self.boss_screen;
        self.held_left = false;
        self.held_right = false;
        self.pending = Pending::default();
        log::debug!("Boss screen {}", if self.boss_screen { "on" } else { "off" });
    }

    /// Activate whatever button sits under a game-space point
    pub fn handle_click(&mut self, x: f32, y: f32) {
        if self.boss_screen {
            return;
        }
        if self.rebinding.take().is_some() {
            return;
        }
        if self.name_edit.is_some() {
            self.commit_name();
        }

        let point = Vec2::new(x, y);
        let hit = buttons(self)
            .iter()
            .position(|b| b.rect.contains_point(point));
        if let Some(index) = hit {
            self.focus = index;
            let id = buttons(self)[index].id;
            self.activate(id);
        }
    }

    pub fn activate(&mut self, id: ButtonId) {
        match id {
            ButtonId::Play => self.start_new_game(),
            ButtonId::Options => self.show(Screen::Options),
            ButtonId::Leaderboard => self.show(Screen::Leaderboard),
            ButtonId::Saves => self.load_saved_game(),
            ButtonId::Name => {
                if self.name_edit.is_some() {
                    self.commit_name();
                } else {
                    self.name_edit = Some(self.settings.player_name.clone());
                }
            }
            ButtonId::Menu => self.go_to_menu(),
            ButtonId::Pause => {
                if self.game.as_ref().is_some_and(|g| g.phase == GamePhase::Playing) {
                    self.pending.pause = true;
                }
            }
            ButtonId::Resume => {
                if self.is_paused() {
                    self.pending.pause = true;
                }
            }
            ButtonId::SaveGame => self.save_game(),
            ButtonId::Rebind(action) => self.rebinding = Some(action),
        }
    }

    fn show(&mut self, screen: Screen) {
        self.screen = screen;
        self.focus = 0;
    }

    fn go_to_menu(&mut self) {
        self.game = None;
        self.menu_bird = MenuBird::new();
        self.held_left = false;
        self.held_right = false;
        self.pending = Pending::default();
        self.show(Screen::MainMenu);
    }

    fn begin(&mut self, game: GameState) {
        self.game = Some(game);
        self.held_left = false;
        self.held_right = false;
        self.pending = Pending::default();
        self.show(Screen::Playing);
    }

    fn start_new_game(&mut self) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        log::info!("Started new game with seed: {}", seed);
        self.begin(GameState::new(seed));
    }

    fn load_saved_game(&mut self) {
        match self.slot.load() {
            Ok(envelope) => {
                let mut game = envelope.state;
                game.phase = GamePhase::Playing;
                self.settings.set_player_name(&envelope.player_name);
                self.settings.bindings = envelope.bindings.validated();
                self.persist_settings();
                self.set_status("Saved game loaded");
                self.begin(game);
            }
            Err(e) if e.is_not_found() => {
                log::warn!("No games have been saved");
                self.set_status("No saved game, starting a new one");
                self.start_new_game();
            }
            Err(e) => {
                log::warn!("Saved game unreadable: {}", e);
                self.set_status("Save file corrupted, starting a new game");
                self.start_new_game();
            }
        }
    }

    fn save_game(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let envelope = SaveEnvelope::new(&self.settings.player_name, &self.settings.bindings, game);
        match self.slot.save(&envelope) {
            Ok(()) => {
                self.go_to_menu();
                self.set_status("Game saved");
            }
            Err(e) => {
                log::error!("Failed to save game: {}", e);
                self.set_status("Could not save the game");
            }
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.data.settings_path()) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    /// Advance one fixed timestep
    pub fn update(&mut self) {
        if let Some(status) = self.status.as_mut() {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.status = None;
            }
        }

        if self.boss_screen {
            return;
        }

        match self.screen {
            Screen::MainMenu => self.menu_bird.tick(),
            Screen::Playing => self.update_game(),
            _ => {}
        }
    }

    fn update_game(&mut self) {
        let Some(game) = self.game.as_mut() else {
            self.go_to_menu();
            return;
        };

        let input = TickInput {
            left: self.held_left,
            right: self.held_right,
            deploy_jetpack: self.pending.deploy_jetpack,
            pause: self.pending.pause,
        };
        self.pending = Pending::default();
        tick(game, &input);

        for event in game.drain_events() {
            match event {
                GameEvent::Landed { tile_id } => log::trace!("Landed on tile {}", tile_id),
                GameEvent::JetpackCollected { charges } => {
                    log::debug!("Jetpack collected ({} stored)", charges)
                }
                GameEvent::JetpackDeployed => log::debug!("Jetpack deployed"),
                GameEvent::JetpackExpired => log::debug!("Jetpack expired"),
                GameEvent::DifficultyUp { spacing } => {
                    log::debug!("Difficulty up, row spacing {}", spacing)
                }
                GameEvent::GameOver { reason } => log::info!("Game over: {:?}", reason),
            }
        }

        if game.phase == GamePhase::GameOver {
            self.finish_run();
        }
    }

    fn finish_run(&mut self) {
        let Some(game) = self.game.take() else {
            return;
        };
        let score = game.score;
        let name = self.settings.player_name.clone();

        let rank = self.leaderboard.add_score(&name, score);
        if let Some(rank) = rank {
            log::info!("{} placed #{} with {}", name, rank, score);
            if let Err(e) = self.leaderboard.save(&self.data.leaderboard_path()) {
                log::warn!("Failed to save high scores: {}", e);
            }
        }

        let summary = RunSummary {
            score,
            high_score: self.leaderboard.top_score().unwrap_or(score).max(score),
            name,
            rank,
            reason: game.end_reason.unwrap_or(EndReason::FellOff),
        };
        self.held_left = false;
        self.held_right = false;
        self.show(Screen::GameOver(summary));
    }
}
