//! Game settings and preferences
//!
//! Edited on the settings screen. Changes apply when the next session starts;
//! the running session keeps the tuning it was created with.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Next preset, wrapping around
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
        }
    }

    /// Multiplier on barrel speeds (roll and ladder descent)
    fn speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
        }
    }

    /// Multiplier on the thrower's idle delay
    fn cadence_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.4,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.7,
        }
    }

    fn max_barrels(&self, base: usize) -> usize {
        match self {
            Difficulty::Easy => (base.saturating_sub(2)).max(1),
            Difficulty::Normal => base,
            Difficulty::Hard => base + 2,
        }
    }

    /// Derive session tuning from the base tuning
    pub fn apply(&self, base: &Tuning) -> Tuning {
        let mut tuning = base.clone();
        let speed = self.speed_scale();
        let cadence = self.cadence_scale();
        tuning.barrel.roll_speed *= speed;
        tuning.barrel.fall_speed *= speed;
        tuning.barrel.max_barrels = self.max_barrels(base.barrel.max_barrels);
        tuning.kong.spawn_min_delay *= cadence;
        tuning.kong.spawn_max_delay *= cadence;
        tuning
    }
}

/// Rows on the settings screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsOption {
    Difficulty,
    ShowFps,
}

impl SettingsOption {
    pub const ALL: [SettingsOption; 2] = [SettingsOption::Difficulty, SettingsOption::ShowFps];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsOption::Difficulty => "Difficulty",
            SettingsOption::ShowFps => "Show FPS",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Change one option; `step` is -1 (left) or +1 (right)
    pub fn adjust(&mut self, option: SettingsOption, step: i32) {
        match option {
            SettingsOption::Difficulty => {
                self.difficulty = if step < 0 { self.difficulty.prev() } else { self.difficulty.next() };
            }
            SettingsOption::ShowFps => self.show_fps = !self.show_fps,
        }
        log::info!("Setting changed: {} = {}", option.label(), self.value_label(option));
    }

    /// Display text for an option's current value
    pub fn value_label(&self, option: SettingsOption) -> &'static str {
        match option {
            SettingsOption::Difficulty => self.difficulty.as_str(),
            SettingsOption::ShowFps if self.show_fps => "On",
            SettingsOption::ShowFps => "Off",
        }
    }

    /// Tuning for a new session under these settings
    pub fn session_tuning(&self, base: &Tuning) -> Tuning {
        self.difficulty.apply(base)
    }
}
