//! Static level geometry: rectangles, platforms, ladders
//!
//! Screen space: x grows right, y grows down. A rectangle's `y` is its top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::LadderTuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Finite coordinates and strictly positive size
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Open-interval horizontal overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Open-interval vertical overlap
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.is_valid() && other.is_valid() && self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// A walkable girder segment. Created at level load and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: Rect,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { rect: Rect::new(x, y, width, height) }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }
}

/// Index of a ladder in the level's ladder list.
///
/// Entities hold this instead of a reference so that a rebuilt level can never
/// leave them pointing at freed geometry; a stale id simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LadderId(pub usize);

/// A climbable ladder. `y` is the top (level with the platform above), the
/// bottom sits on the platform below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    rect: Rect,
    /// Mounting tolerance above the top and below the bottom
    pub entry_zone_height: f32,
    /// Widens the stay-on zone past the visual width
    pub collision_padding: f32,
    /// Max centre-to-centre distance for mounting
    pub snap_distance: f32,
}

impl Ladder {
    pub fn new(x: f32, y: f32, width: f32, height: f32, tuning: &LadderTuning) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            entry_zone_height: tuning.entry_zone_height,
            collision_padding: tuning.collision_padding,
            snap_distance: tuning.snap_distance,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.rect.bottom()
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.rect.center_x()
    }

    /// Vertical span of the ladder body plus both entry zones
    fn vertical_zone(&self) -> (f32, f32) {
        (
            self.rect.top() - self.entry_zone_height,
            self.rect.bottom() + self.entry_zone_height,
        )
    }

    fn overlaps_vertical_zone(&self, body: &Rect) -> bool {
        let (top, bottom) = self.vertical_zone();
        body.top() < bottom && body.bottom() > top
    }

    /// Whether an entity may mount this ladder: its centre is within
    /// `snap_distance` of the ladder centre and it overlaps the ladder body
    /// or an entry zone.
    pub fn can_climb(&self, body: &Rect) -> bool {
        if !body.is_valid() || !self.rect.is_valid() {
            return false;
        }
        let dx = (body.center_x() - self.center_x()).abs();
        dx <= self.snap_distance && self.overlaps_vertical_zone(body)
    }

    /// Whether an entity already on the ladder is still close enough to stay on
    pub fn in_climb_zone(&self, body: &Rect) -> bool {
        if !body.is_valid() || !self.rect.is_valid() {
            return false;
        }
        let cx = body.center_x();
        cx >= self.rect.left() - self.collision_padding
            && cx <= self.rect.right() + self.collision_padding
            && self.overlaps_vertical_zone(body)
    }
}
