//! Collision detection for axis-aligned boxes
//!
//! Two checks: a general overlap test that reports how deep and along which
//! axis two boxes interpenetrate, and the one-sided platform landing test.

use serde::{Deserialize, Serialize};

use super::geometry::{Platform, Rect};
use super::physics::Body;

/// Axis along which two overlapping boxes should be separated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Result of an AABB overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbResult {
    /// Whether the boxes overlap
    pub colliding: bool,
    /// Horizontal overlap (0 when not colliding)
    pub penetration_x: f32,
    /// Vertical overlap (0 when not colliding)
    pub penetration_y: f32,
    /// The smaller of the two overlaps
    pub penetration_depth: f32,
    /// Axis with the smaller overlap
    pub axis: Axis,
}

impl AabbResult {
    pub fn miss() -> Self {
        Self {
            colliding: false,
            penetration_x: 0.0,
            penetration_y: 0.0,
            penetration_depth: 0.0,
            axis: Axis::X,
        }
    }
}

/// Overlap test using centre distance against the sum of half extents.
///
/// The reported axis is the one with the *smaller* penetration: that is the
/// side the boxes touched on and the cheapest direction to push them apart.
/// Degenerate (zero/negative/non-finite) rectangles never collide.
pub fn check_aabb(a: &Rect, b: &Rect) -> AabbResult {
    if !a.is_valid() || !b.is_valid() {
        return AabbResult::miss();
    }

    let delta = a.center() - b.center();
    let overlap_x = (a.width + b.width) / 2.0 - delta.x.abs();
    let overlap_y = (a.height + b.height) / 2.0 - delta.y.abs();

    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return AabbResult::miss();
    }

    let (axis, depth) = if overlap_x < overlap_y {
        (Axis::X, overlap_x)
    } else {
        (Axis::Y, overlap_y)
    };

    AabbResult {
        colliding: true,
        penetration_x: overlap_x,
        penetration_y: overlap_y,
        penetration_depth: depth,
        axis,
    }
}

/// Result of a platform landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformHit {
    pub colliding: bool,
    /// Top-left y that rests the body exactly on the platform
    pub snap_y: f32,
}

impl PlatformHit {
    fn miss() -> Self {
        Self { colliding: false, snap_y: 0.0 }
    }
}

/// One-sided landing test.
///
/// Hits only when the body is not rising (`vel.y >= 0`), its bottom edge is
/// within `tolerance` of the platform top, and the horizontal ranges overlap.
/// Bodies moving up pass through platforms from below.
pub fn check_platform_collision(body: &Body, platform: &Platform, tolerance: f32) -> PlatformHit {
    let rect = body.rect();
    if !body.is_valid() || !platform.rect().is_valid() {
        return PlatformHit::miss();
    }
    if body.vel.y < 0.0 {
        return PlatformHit::miss();
    }
    if !rect.overlaps_x(platform.rect()) {
        return PlatformHit::miss();
    }
    if (rect.bottom() - platform.top()).abs() > tolerance {
        return PlatformHit::miss();
    }

    PlatformHit {
        colliding: true,
        snap_y: platform.top() - body.size.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_aabb_reports_shallow_axis() {
        // Overlap 4px horizontally, 20px vertically
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let b = Rect::new(16.0, 0.0, 20.0, 20.0);
        let result = check_aabb(&a, &b);
        assert!(result.colliding);
        assert_eq!(result.axis, Axis::X);
        assert_eq!(result.penetration_depth, 4.0);

        // Landing on top: 2px vertical overlap
        let c = Rect::new(5.0, 18.0, 20.0, 20.0);
        let result = check_aabb(&a, &c);
        assert_eq!(result.axis, Axis::Y);
        assert_eq!(result.penetration_depth, 2.0);
    }

    #[test]
    fn test_aabb_touching_is_not_colliding() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!check_aabb(&a, &b).colliding);
    }

    #[test]
    fn test_aabb_degenerate_never_collides() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!check_aabb(&a, &Rect::new(2.0, 2.0, 0.0, 0.0)).colliding);
        assert!(!check_aabb(&Rect::new(2.0, 2.0, -4.0, 4.0), &a).colliding);
    }

    fn falling_body(bottom: f32, vy: f32) -> Body {
        let mut body = Body::new(Vec2::new(50.0, bottom - 32.0), Vec2::new(24.0, 32.0));
        body.vel.y = vy;
        body
    }

    #[test]
    fn test_platform_landing() {
        let platform = Platform::new(0.0, 200.0, 300.0, 16.0);
        let hit = check_platform_collision(&falling_body(203.0, 120.0), &platform, 8.0);
        assert!(hit.colliding);
        assert_eq!(hit.snap_y, 168.0);

        // Resting exactly on top with zero velocity still counts
        assert!(check_platform_collision(&falling_body(200.0, 0.0), &platform, 8.0).colliding);
    }

    #[test]
    fn test_platform_ignores_rising_bodies() {
        let platform = Platform::new(0.0, 200.0, 300.0, 16.0);
        let hit = check_platform_collision(&falling_body(202.0, -50.0), &platform, 8.0);
        assert!(!hit.colliding);
    }

    #[test]
    fn test_platform_requires_horizontal_overlap_and_tolerance() {
        let platform = Platform::new(100.0, 200.0, 100.0, 16.0);
        let body = falling_body(202.0, 100.0); // x 50..74
        assert!(!check_platform_collision(&body, &platform, 8.0).colliding);

        let platform = Platform::new(0.0, 200.0, 300.0, 16.0);
        assert!(!check_platform_collision(&falling_body(215.0, 100.0), &platform, 8.0).colliding);
    }

    proptest! {
        #[test]
        fn prop_aabb_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let a = Rect::new(ax, ay, w, h);
            let b = Rect::new(bx, by, h, w);
            let ab = check_aabb(&a, &b);
            let ba = check_aabb(&b, &a);
            prop_assert_eq!(ab.colliding, ba.colliding);
            prop_assert_eq!(ab.axis, ba.axis);
        }

        #[test]
        fn prop_rising_never_lands(vy in -1000.0f32..-0.001, bottom in 190.0f32..210.0) {
            let platform = Platform::new(0.0, 200.0, 300.0, 16.0);
            prop_assert!(!check_platform_collision(&falling_body(bottom, vy), &platform, 8.0).colliding);
        }
    }
}
