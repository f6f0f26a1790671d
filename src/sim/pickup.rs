//! Static collectibles: hammer power-ups and the goal

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::{HAMMER_SIZE, PRINCESS_HEIGHT, PRINCESS_WIDTH};

/// Hover animation speed (radians/sec) and height (px)
const BOB_SPEED: f32 = 3.0;
const BOB_AMPLITUDE: f32 = 4.0;

/// Hammer power-up. Collected once, permanently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hammer {
    pub pos: Vec2,
    pub size: Vec2,
    pub is_collected: bool,
    bob_time: f32,
}

impl Hammer {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(HAMMER_SIZE),
            is_collected: false,
            bob_time: 0.0,
        }
    }

    /// Collision box (rest position; the bob is cosmetic)
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Vertical draw offset for the hover animation
    pub fn bob_offset(&self) -> f32 {
        (self.bob_time * BOB_SPEED).sin() * BOB_AMPLITUDE
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_collected {
            self.bob_time += dt;
        }
    }
}

/// The goal character; touching her ends the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Princess {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Princess {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, size: Vec2::new(PRINCESS_WIDTH, PRINCESS_HEIGHT) }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hammer_bobs_without_moving_hitbox() {
        let mut hammer = Hammer::new(Vec2::new(100.0, 200.0));
        let rect = hammer.rect();
        hammer.update(0.25);
        assert!(hammer.bob_offset().abs() > 0.0);
        assert!(hammer.bob_offset().abs() <= BOB_AMPLITUDE);
        assert_eq!(hammer.rect(), rect);
    }

    #[test]
    fn test_collected_hammer_stops_animating() {
        let mut hammer = Hammer::new(Vec2::ZERO);
        hammer.is_collected = true;
        hammer.update(1.0);
        assert_eq!(hammer.bob_offset(), 0.0);
    }
}
