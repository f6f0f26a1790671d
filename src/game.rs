//! Application state machine
//!
//! Wraps at most one gameplay session and decides, per fixed step, whether it
//! ticks. Only `Playing` advances the simulation; every other state leaves the
//! session untouched so it can still be drawn under an overlay.

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::settings::{Settings, SettingsOption};
use crate::sim::{GameEvent, GameState, Outcome, RandomSource, SeededRandom, TickInput, tick};
use crate::tuning::Tuning;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppState {
    Menu,
    Playing,
    Paused,
    Settings,
    GameOver,
    LevelComplete,
}

impl AppState {
    /// Whether a session is alive in this state
    pub fn has_session(&self) -> bool {
        !matches!(self, AppState::Menu)
    }
}

/// Edge-triggered menu navigation, used on the settings screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNav {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything the app reads from the input layer for one fixed step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInput {
    pub tick: TickInput,
    /// One-shot: toggle pause / close settings
    pub pause: bool,
    /// One-shot: open or close the settings screen
    pub settings: bool,
    /// One-shot: start a game / leave a results screen
    pub confirm: bool,
    pub nav: MenuNav,
}

impl AppInput {
    /// Drop the one-shot flags after a step consumed them
    pub fn clear_edges(&mut self) {
        self.tick.jump_pressed = false;
        self.pause = false;
        self.settings = false;
        self.confirm = false;
        self.nav = MenuNav::default();
    }
}

/// Builds the random source for a new session from its seed
pub type RandomFactory = fn(u64) -> Box<dyn RandomSource>;

fn seeded_random(seed: u64) -> Box<dyn RandomSource> {
    Box::new(SeededRandom::new(seed))
}

#[derive(Debug)]
pub struct Game {
    state: AppState,
    session: Option<GameState>,
    settings: Settings,
    settings_cursor: usize,
    base_tuning: Tuning,
    high_scores: HighScores,
    base_seed: u64,
    sessions_started: u64,
    random: RandomFactory,
}

impl Game {
    pub fn new(base_tuning: Tuning, base_seed: u64) -> Self {
        Self {
            state: AppState::Menu,
            session: None,
            settings: Settings::default(),
            settings_cursor: 0,
            base_tuning,
            high_scores: HighScores::new(),
            base_seed,
            sessions_started: 0,
            random: seeded_random,
        }
    }

    /// Replace how sessions get their random source
    pub fn with_random(mut self, random: RandomFactory) -> Self {
        self.random = random;
        self
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameState> {
        self.session.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn settings_cursor(&self) -> SettingsOption {
        SettingsOption::ALL[self.settings_cursor % SettingsOption::ALL.len()]
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Best recorded score, 0 before any run has scored
    pub fn high_score(&self) -> u64 {
        self.high_scores.top_score()
    }

    /// Events from the live session since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.as_mut().map(GameState::drain_events).unwrap_or_default()
    }

    /// Advance one fixed step
    pub fn update(&mut self, dt: f32, input: &AppInput) {
        match self.state {
            AppState::Menu => {
                if input.confirm || input.tick.jump_pressed {
                    self.start_session();
                }
            }
            AppState::Playing => self.update_playing(dt, input),
            AppState::Paused => {
                if input.pause {
                    self.transition(AppState::Playing);
                } else if input.settings {
                    self.transition(AppState::Settings);
                }
            }
            AppState::Settings => {
                if input.settings || input.pause {
                    self.transition(AppState::Paused);
                } else {
                    self.navigate_settings(&input.nav);
                }
            }
            AppState::GameOver | AppState::LevelComplete => {
                if input.confirm {
                    self.session = None;
                    self.transition(AppState::Menu);
                }
            }
        }
    }

    /// Pause from outside the input stream (tab hidden, window blur)
    pub fn auto_pause(&mut self) {
        if self.state == AppState::Playing {
            self.transition(AppState::Paused);
        }
    }

    fn update_playing(&mut self, dt: f32, input: &AppInput) {
        if input.pause {
            self.transition(AppState::Paused);
            return;
        }

        let Some(session) = self.session.as_mut() else {
            log::warn!("Playing without a session, returning to menu");
            self.transition(AppState::Menu);
            return;
        };

        tick(session, &input.tick, dt);

        if let Some(outcome) = session.outcome() {
            let (score, elapsed) = (session.score, session.elapsed);
            if let Some(rank) = self.high_scores.add_score(score, outcome, elapsed) {
                log::info!("New high score #{}: {}", rank, score);
            }
            self.transition(match outcome {
                Outcome::GameOver => AppState::GameOver,
                Outcome::LevelComplete => AppState::LevelComplete,
            });
        }
    }

    fn start_session(&mut self) {
        let seed = self.base_seed.wrapping_add(self.sessions_started);
        self.sessions_started += 1;
        let tuning = self.settings.session_tuning(&self.base_tuning);
        let level = crate::sim::Level::classic(&tuning.ladder);
        self.session = Some(GameState::with_level(level, tuning, seed, (self.random)(seed)));
        self.transition(AppState::Playing);
    }

    fn navigate_settings(&mut self, nav: &MenuNav) {
        let count = SettingsOption::ALL.len();
        if nav.up {
            self.settings_cursor = (self.settings_cursor + count - 1) % count;
        }
        if nav.down {
            self.settings_cursor = (self.settings_cursor + 1) % count;
        }
        let option = self.settings_cursor();
        if nav.left {
            self.settings.adjust(option, -1);
        }
        if nav.right {
            self.settings.adjust(option, 1);
        }
    }

    fn transition(&mut self, next: AppState) {
        log::info!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Difficulty;
    use crate::sim::FixedRandom;

    fn game() -> Game {
        Game::new(Tuning::default(), 7).with_random(|_| Box::new(FixedRandom(0.999)))
    }

    fn press(f: impl FnOnce(&mut AppInput)) -> AppInput {
        let mut input = AppInput::default();
        f(&mut input);
        input
    }

    fn start(game: &mut Game) {
        game.update(SIM_DT, &press(|i| i.confirm = true));
        assert_eq!(game.state(), AppState::Playing);
    }

    #[test]
    fn test_menu_starts_on_confirm_or_jump() {
        let mut g = game();
        g.update(SIM_DT, &AppInput::default());
        assert_eq!(g.state(), AppState::Menu);
        assert!(g.session().is_none());

        g.update(SIM_DT, &press(|i| i.tick.jump_pressed = true));
        assert_eq!(g.state(), AppState::Playing);
        assert!(g.session().is_some());
    }

    #[test]
    fn test_each_session_gets_a_fresh_seed() {
        let mut g = game();
        start(&mut g);
        let first = g.session().map(|s| s.seed);
        g.session_mut().unwrap().lives = 0;
        g.update(SIM_DT, &AppInput::default());
        assert_eq!(g.state(), AppState::GameOver);
        g.update(SIM_DT, &press(|i| i.confirm = true));
        assert_eq!(g.state(), AppState::Menu);
        assert!(g.session().is_none());

        start(&mut g);
        assert_ne!(g.session().map(|s| s.seed), first);
    }

    #[test]
    fn test_pause_settings_round_trip() {
        let mut g = game();
        start(&mut g);
        g.update(SIM_DT, &press(|i| i.pause = true));
        assert_eq!(g.state(), AppState::Paused);
        g.update(SIM_DT, &press(|i| i.settings = true));
        assert_eq!(g.state(), AppState::Settings);
        g.update(SIM_DT, &press(|i| i.pause = true));
        assert_eq!(g.state(), AppState::Paused);
        g.update(SIM_DT, &press(|i| i.pause = true));
        assert_eq!(g.state(), AppState::Playing);
    }

    #[test]
    fn test_paused_session_is_frozen() {
        let mut g = game();
        start(&mut g);
        let right = press(|i| i.tick.right = true);
        for _ in 0..30 {
            g.update(SIM_DT, &right);
        }
        g.update(SIM_DT, &press(|i| i.pause = true));
        let pos = g.session().unwrap().player.body.pos;
        let ticks = g.session().unwrap().time_ticks;
        for _ in 0..500 {
            g.update(SIM_DT, &right);
        }
        assert_eq!(g.session().unwrap().player.body.pos, pos);
        assert_eq!(g.session().unwrap().time_ticks, ticks);
    }

    #[test]
    fn test_settings_navigation() {
        let mut g = game();
        start(&mut g);
        g.update(SIM_DT, &press(|i| i.pause = true));
        g.update(SIM_DT, &press(|i| i.settings = true));

        assert_eq!(g.settings_cursor(), SettingsOption::Difficulty);
        g.update(SIM_DT, &press(|i| i.nav.right = true));
        assert_eq!(g.settings().difficulty, Difficulty::Hard);

        g.update(SIM_DT, &press(|i| i.nav.down = true));
        assert_eq!(g.settings_cursor(), SettingsOption::ShowFps);
        g.update(SIM_DT, &press(|i| i.nav.left = true));
        assert!(g.settings().show_fps);

        g.update(SIM_DT, &press(|i| i.nav.down = true));
        assert_eq!(g.settings_cursor(), SettingsOption::Difficulty);
    }

    #[test]
    fn test_difficulty_applies_to_next_session() {
        let mut g = game();
        g.settings_mut().difficulty = Difficulty::Hard;
        start(&mut g);
        let base = Tuning::default();
        let session_max = g.session().unwrap().tuning.barrel.max_barrels;
        assert_eq!(session_max, Difficulty::Hard.apply(&base).barrel.max_barrels);
    }

    #[test]
    fn test_auto_pause_only_while_playing() {
        let mut g = game();
        g.auto_pause();
        assert_eq!(g.state(), AppState::Menu);
        start(&mut g);
        g.auto_pause();
        assert_eq!(g.state(), AppState::Paused);
    }

    #[test]
    fn test_clear_edges_keeps_held_keys() {
        let mut input = AppInput {
            tick: TickInput { left: true, jump_pressed: true, jump_held: true, ..Default::default() },
            pause: true,
            confirm: true,
            ..Default::default()
        };
        input.clear_edges();
        assert!(input.tick.left && input.tick.jump_held);
        assert!(!input.tick.jump_pressed && !input.pause && !input.confirm);
    }
}
