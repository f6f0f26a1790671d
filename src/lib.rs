//! Barrel Climb - a ladder-and-girder arcade platformer
//!
//! Core modules:
//! - `sim`: Simulation (physics, entities, per-frame session update)
//! - `game`: Application state machine (menu, playing, paused, settings, results)
//! - `platform`: Browser/native glue (keyboard mapping, frame driver)
//! - `renderer`: Read-only snapshots handed to the drawing layer
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{AppInput, AppState, Game, MenuNav};
pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 12;
    /// Wall-clock delta cap; larger gaps (tab backgrounded) are truncated
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Entity sizes (pixels)
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const BARREL_SIZE: f32 = 20.0;
    pub const KONG_WIDTH: f32 = 64.0;
    pub const KONG_HEIGHT: f32 = 56.0;
    pub const PRINCESS_WIDTH: f32 = 24.0;
    pub const PRINCESS_HEIGHT: f32 = 36.0;
    pub const HAMMER_SIZE: f32 = 20.0;
    pub const PLATFORM_THICKNESS: f32 = 16.0;
    pub const LADDER_WIDTH: f32 = 30.0;
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}
