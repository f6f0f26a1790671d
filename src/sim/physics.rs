//! Integration primitives shared by every moving entity
//!
//! These never panic. A body with non-finite position, velocity, or size is
//! logged and left untouched so one bad entity cannot stall the frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Position, velocity, and size of a moving entity (pixels, pixels/second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO, size }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn has_valid_motion(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }

    pub fn is_valid(&self) -> bool {
        self.has_valid_motion() && self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0
    }
}

/// `vel.y += gravity * dt`
pub fn apply_gravity(body: &mut Body, gravity: f32, dt: f32) {
    if !body.vel.is_finite() {
        log::warn!("apply_gravity: skipping body with invalid velocity {:?}", body.vel);
        return;
    }
    body.vel.y += gravity * dt;
}

/// Clamp vertical speed to `±max_fall_speed`
pub fn clamp_velocity(body: &mut Body, max_fall_speed: f32) {
    if !body.vel.is_finite() {
        log::warn!("clamp_velocity: skipping body with invalid velocity {:?}", body.vel);
        return;
    }
    body.vel.y = body.vel.y.clamp(-max_fall_speed, max_fall_speed);
}

/// Explicit Euler step: `pos += vel * dt`
pub fn integrate(body: &mut Body, dt: f32) {
    if !body.has_valid_motion() {
        log::warn!(
            "integrate: skipping body with invalid state pos={:?} vel={:?}",
            body.pos,
            body.vel
        );
        return;
    }
    body.pos += body.vel * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body() -> Body {
        Body::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_integrate() {
        let mut b = body();
        b.vel = Vec2::new(100.0, -50.0);
        integrate(&mut b, 0.5);
        assert_eq!(b.pos, Vec2::new(60.0, -15.0));
    }

    #[test]
    fn test_invalid_body_is_left_alone() {
        let mut b = body();
        b.vel = Vec2::new(f32::NAN, 0.0);
        apply_gravity(&mut b, 1200.0, 0.1);
        clamp_velocity(&mut b, 600.0);
        integrate(&mut b, 0.1);
        assert_eq!(b.pos, Vec2::new(10.0, 10.0));
        assert!(b.vel.x.is_nan());
        assert_eq!(b.vel.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_bounds_vertical_speed(vy in -1.0e6f32..1.0e6, max in 1.0f32..2000.0) {
            let mut b = body();
            b.vel.y = vy;
            clamp_velocity(&mut b, max);
            prop_assert!(b.vel.y.abs() <= max);
        }

        #[test]
        fn prop_gravity_adds_exact_increment(vy in -600.0f32..600.0, dt in 0.0f32..0.1) {
            let gravity = 1200.0;
            let mut b = body();
            b.vel.y = vy;
            apply_gravity(&mut b, gravity, dt);
            prop_assert_eq!(b.vel.y, vy + gravity * dt);
        }
    }
}
