//! The player character
//!
//! Three movement states: grounded, airborne, climbing. Horizontal motion
//! accelerates toward walk speed rather than snapping; ladders override
//! gravity entirely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::check_platform_collision;
use super::geometry::{LadderId, Rect};
use super::level::Level;
use super::physics::{Body, apply_gravity, clamp_velocity, integrate};
use super::tick::TickInput;
use crate::approach;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::tuning::{PlayerTuning, Tuning};

/// Movement state. The ladder id only exists while climbing, so leaving a
/// ladder always drops the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMotion {
    Grounded,
    Airborne,
    Climbing { ladder: LadderId },
}

/// Discrete animation tag for the drawing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Jump,
    Climb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Things that happened during a player update the session cares about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub hammer_expired: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    facing: Facing,
    motion: PlayerMotion,
    /// Set by a jump, cleared on landing or when the jump is cut short
    is_jumping: bool,
    invincibility_timer: f32,
    hammer_timer: f32,
    animation: AnimationState,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            body: Body::new(start, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            facing: Facing::Right,
            motion: PlayerMotion::Grounded,
            is_jumping: false,
            invincibility_timer: 0.0,
            hammer_timer: 0.0,
            animation: AnimationState::Idle,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn motion(&self) -> PlayerMotion {
        self.motion
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_on_ground(&self) -> bool {
        self.motion == PlayerMotion::Grounded
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self.motion, PlayerMotion::Climbing { .. })
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn current_ladder(&self) -> Option<LadderId> {
        match self.motion {
            PlayerMotion::Climbing { ladder } => Some(ladder),
            _ => None,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    pub fn invincibility_timer(&self) -> f32 {
        self.invincibility_timer
    }

    pub fn has_hammer(&self) -> bool {
        self.hammer_timer > 0.0
    }

    pub fn hammer_timer(&self) -> f32 {
        self.hammer_timer
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation
    }

    /// Start invincibility unless already invincible.
    ///
    /// Returns true when the hit landed (the caller deducts a life). While
    /// invincible the call is a no-op and the timer is not refreshed.
    pub fn take_damage(&mut self, tuning: &PlayerTuning) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.invincibility_timer = tuning.invincibility_duration;
        true
    }

    /// Grab a hammer; picking up another resets the timer
    pub fn pickup_hammer(&mut self, tuning: &PlayerTuning) {
        self.hammer_timer = tuning.hammer_duration;
    }

    /// Smash box while the hammer is held: the body extended by `reach` on the
    /// facing side
    pub fn hammer_hitbox(&self, reach: f32) -> Option<Rect> {
        if !self.has_hammer() {
            return None;
        }
        let mut rect = self.rect();
        rect.width += reach;
        if self.facing == Facing::Left {
            rect.x -= reach;
        }
        Some(rect)
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput, level: &Level, tuning: &Tuning, dt: f32) -> PlayerUpdate {
        let mut result = PlayerUpdate::default();

        self.invincibility_timer = (self.invincibility_timer - dt).max(0.0);
        if self.hammer_timer > 0.0 {
            self.hammer_timer -= dt;
            if self.hammer_timer <= 0.0 {
                self.hammer_timer = 0.0;
                result.hammer_expired = true;
            }
        }

        if !self.body.is_valid() {
            log::warn!("Player update skipped: invalid body {:?}", self.body);
            return result;
        }

        let dir = input.horizontal();
        let vertical = input.vertical();
        if dir != 0.0 {
            self.facing = if dir < 0.0 { Facing::Left } else { Facing::Right };
        }

        // Leaving a ladder: sideways input, or the ladder no longer exists
        if let PlayerMotion::Climbing { ladder } = self.motion {
            if dir != 0.0 || level.ladder(ladder).is_none() {
                self.motion = PlayerMotion::Airborne;
            }
        }

        // Sideways input blocks mounting
        if !self.is_climbing() && vertical != 0.0 && dir == 0.0 {
            self.try_mount(level, vertical, tuning.player.climb_speed * dt);
        }

        if let PlayerMotion::Climbing { ladder } = self.motion {
            self.update_climbing(ladder, vertical, level, tuning, dt);
        } else {
            self.update_free(input, dir, level, tuning, dt);
        }

        self.clamp_to_screen(tuning);
        self.animation = self.derive_animation();
        result
    }

    /// Grab the first reachable ladder, unless the first climb step in
    /// `vertical` would already carry the player off its end
    fn try_mount(&mut self, level: &Level, vertical: f32, step: f32) {
        let rect = self.rect();
        let bottom = self.body.bottom();
        let found = level.ladders_with_ids().find(|(_, l)| {
            let exits_at_once = if vertical < 0.0 {
                bottom - step <= l.top()
            } else {
                bottom + step >= l.bottom()
            };
            l.can_climb(&rect) && !exits_at_once
        });
        if let Some((id, ladder)) = found {
            self.motion = PlayerMotion::Climbing { ladder: id };
            self.is_jumping = false;
            self.body.vel = Vec2::ZERO;
            self.body.pos.x = ladder.center_x() - self.body.size.x / 2.0;
        }
    }

    fn update_climbing(&mut self, id: LadderId, vertical: f32, level: &Level, tuning: &Tuning, dt: f32) {
        let Some(ladder) = level.ladder(id) else {
            self.motion = PlayerMotion::Airborne;
            return;
        };

        self.body.vel = Vec2::new(0.0, vertical * tuning.player.climb_speed);
        integrate(&mut self.body, dt);

        if vertical < 0.0 && self.body.bottom() <= ladder.top() {
            // Climbed out the top onto the girder above
            self.body.pos.y = ladder.top() - self.body.size.y;
            self.body.vel.y = 0.0;
            self.motion = PlayerMotion::Grounded;
        } else if vertical > 0.0 && self.body.bottom() >= ladder.bottom() {
            self.body.pos.y = ladder.bottom() - self.body.size.y;
            self.body.vel.y = 0.0;
            self.motion = PlayerMotion::Grounded;
        } else if !ladder.in_climb_zone(&self.rect()) {
            self.motion = PlayerMotion::Airborne;
        }
    }

    fn update_free(&mut self, input: &TickInput, dir: f32, level: &Level, tuning: &Tuning, dt: f32) {
        let p = &tuning.player;
        let grounded = self.motion == PlayerMotion::Grounded;

        if dir != 0.0 {
            let target = dir * p.walk_speed;
            let mut rate = if self.body.vel.x * dir < 0.0 { p.deceleration } else { p.acceleration };
            if !grounded {
                rate *= p.air_control;
            }
            self.body.vel.x = approach(self.body.vel.x, target, rate * dt);
        } else if grounded {
            self.body.vel.x = approach(self.body.vel.x, 0.0, p.friction * dt);
        }

        if input.jump_pressed && grounded {
            self.body.vel.y = p.jump_velocity;
            self.is_jumping = true;
            self.motion = PlayerMotion::Airborne;
        } else if self.is_jumping && self.body.vel.y < 0.0 && !input.jump_held {
            self.body.vel.y *= p.jump_cut_multiplier;
            self.is_jumping = false;
        }

        apply_gravity(&mut self.body, tuning.gravity, dt);
        clamp_velocity(&mut self.body, tuning.max_fall_speed);
        integrate(&mut self.body, dt);

        let landing = level
            .platforms
            .iter()
            .map(|platform| check_platform_collision(&self.body, platform, tuning.platform_snap_tolerance))
            .find(|hit| hit.colliding);

        if let Some(hit) = landing {
            self.body.pos.y = hit.snap_y;
            self.body.vel.y = 0.0;
            self.is_jumping = false;
            self.motion = PlayerMotion::Grounded;
        } else {
            self.motion = PlayerMotion::Airborne;
        }
    }

    fn clamp_to_screen(&mut self, tuning: &Tuning) {
        let max_x = tuning.canvas_width - self.body.size.x;
        if self.body.pos.x < 0.0 {
            self.body.pos.x = 0.0;
            self.body.vel.x = 0.0;
        } else if self.body.pos.x > max_x {
            self.body.pos.x = max_x;
            self.body.vel.x = 0.0;
        }

        let max_y = tuning.canvas_height - self.body.size.y;
        if self.body.pos.y > max_y {
            self.body.pos.y = max_y;
            self.body.vel.y = 0.0;
            self.is_jumping = false;
            self.motion = PlayerMotion::Grounded;
        }
    }

    fn derive_animation(&self) -> AnimationState {
        match self.motion {
            PlayerMotion::Climbing { .. } => AnimationState::Climb,
            PlayerMotion::Airborne => AnimationState::Jump,
            PlayerMotion::Grounded if self.body.vel.x.abs() > 1.0 => AnimationState::Walk,
            PlayerMotion::Grounded => AnimationState::Idle,
        }
    }
}
