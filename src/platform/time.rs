//! Fixed-timestep frame driver
//!
//! The display calls `frame` once per refresh with a wall-clock timestamp.
//! Wall time is capped, accumulated, and spent in `SIM_DT` substeps so the
//! simulation only ever sees one step size.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::game::Game;
use crate::renderer::{Renderer, Snapshot};

use super::input::InputTracker;

const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameDriver {
    last_time: Option<f64>,
    accumulator: f32,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            last_time: None,
            accumulator: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget the previous timestamp so the next frame counts as the first
    /// (used after the tab was hidden)
    pub fn reset_clock(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Run one display frame: simulate, then draw once. Returns the number of
    /// fixed steps taken.
    pub fn frame(&mut self, game: &mut Game, now_ms: f64, input: &mut InputTracker, renderer: &mut dyn Renderer) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);

        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let step_input = input.snapshot();
            game.update(SIM_DT, &step_input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.clear_pressed();
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        self.track_fps(now_ms);

        let fps = game.settings().show_fps.then_some(self.fps);
        renderer.draw(&Snapshot::capture(game, fps));
        substeps
    }

    fn track_fps(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}
