//! The barrel thrower
//!
//! Cycles idle → throw → idle. The spawn signal fires exactly once, on the
//! idle → throw edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::rng::RandomSource;
use crate::consts::{KONG_HEIGHT, KONG_WIDTH};
use crate::tuning::KongTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KongPhase {
    /// Counting up to `throw_delay`
    Idle,
    /// Throw animation playing
    Throw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kong {
    pub pos: Vec2,
    pub size: Vec2,
    phase: KongPhase,
    /// Seconds spent in the current phase
    throw_timer: f32,
    /// Idle time before the next throw, re-rolled every cycle
    throw_delay: f32,
}

impl Kong {
    pub fn new(pos: Vec2, tuning: &KongTuning, rng: &mut dyn RandomSource) -> Self {
        Self {
            pos,
            size: Vec2::new(KONG_WIDTH, KONG_HEIGHT),
            phase: KongPhase::Idle,
            throw_timer: 0.0,
            throw_delay: Self::roll_delay(tuning, rng),
        }
    }

    fn roll_delay(tuning: &KongTuning, rng: &mut dyn RandomSource) -> f32 {
        rng.range(tuning.spawn_min_delay, tuning.spawn_max_delay)
    }

    pub fn phase(&self) -> KongPhase {
        self.phase
    }

    pub fn throw_timer(&self) -> f32 {
        self.throw_timer
    }

    pub fn throw_delay(&self) -> f32 {
        self.throw_delay
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Bottom-centre of the bounds, where thrown barrels appear
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    /// Advance the cycle; returns true on the frame a barrel should be thrown
    pub fn update(&mut self, tuning: &KongTuning, rng: &mut dyn RandomSource, dt: f32) -> bool {
        self.throw_timer += dt;
        match self.phase {
            KongPhase::Idle if self.throw_timer >= self.throw_delay => {
                self.phase = KongPhase::Throw;
                self.throw_timer = 0.0;
                true
            }
            KongPhase::Throw if self.throw_timer >= tuning.throw_animation_duration => {
                self.phase = KongPhase::Idle;
                self.throw_timer = 0.0;
                self.throw_delay = Self::roll_delay(tuning, rng);
                false
            }
            KongPhase::Idle | KongPhase::Throw => false,
        }
    }
}
