//! Level layout
//!
//! Static data table describing girders, ladders, and where each entity
//! starts. The classic stage zig-zags: every girder leaves a gap on alternate
//! sides so barrels drop to the one below and reverse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Ladder, LadderId, Platform};
use crate::consts::*;
use crate::tuning::LadderTuning;

/// Girder tops of the classic stage, top to bottom (y, x, width)
const GIRDERS: [(f32, f32, f32); 7] = [
    (40.0, 320.0, 160.0), // princess perch
    (120.0, 0.0, 740.0),  // kong's girder
    (210.0, 60.0, 740.0),
    (300.0, 0.0, 740.0),
    (390.0, 60.0, 740.0),
    (480.0, 0.0, 740.0),
    (570.0, 0.0, 800.0), // ground floor
];

/// Ladders of the classic stage (x, top y, bottom y)
const LADDERS: [(f32, f32, f32); 6] = [
    (440.0, 40.0, 120.0),
    (520.0, 120.0, 210.0),
    (240.0, 210.0, 300.0),
    (560.0, 300.0, 390.0),
    (200.0, 390.0, 480.0),
    (600.0, 480.0, 570.0),
];

/// Hammer rest positions (top-left), a jump above their girder
const HAMMERS: [(f32, f32); 2] = [(100.0, 330.0), (680.0, 150.0)];

/// Static description of one stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Ordered list of walkable segments
    pub platforms: Vec<Platform>,
    /// Ordered list of ladders; `LadderId` indexes into this
    pub ladders: Vec<Ladder>,
    /// Player top-left at session start
    pub player_start: Vec2,
    /// Barrel thrower top-left
    pub kong_pos: Vec2,
    /// Goal top-left
    pub princess_pos: Vec2,
    /// Hammer power-up top-left positions
    pub hammer_spawns: Vec<Vec2>,
}

impl Level {
    /// The one stage the game ships with
    pub fn classic(ladder_tuning: &LadderTuning) -> Self {
        let platforms = GIRDERS
            .iter()
            .map(|&(y, x, w)| Platform::new(x, y, w, PLATFORM_THICKNESS))
            .collect();
        let ladders = LADDERS
            .iter()
            .map(|&(x, top, bottom)| Ladder::new(x, top, LADDER_WIDTH, bottom - top, ladder_tuning))
            .collect();

        Self {
            platforms,
            ladders,
            player_start: Vec2::new(40.0, 570.0 - PLAYER_HEIGHT),
            kong_pos: Vec2::new(20.0, 120.0 - KONG_HEIGHT),
            princess_pos: Vec2::new(388.0, 40.0 - PRINCESS_HEIGHT),
            hammer_spawns: HAMMERS.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        }
    }

    /// Resolve a ladder id; `None` when the id is stale
    pub fn ladder(&self, id: LadderId) -> Option<&Ladder> {
        self.ladders.get(id.0)
    }

    pub fn ladders_with_ids(&self) -> impl Iterator<Item = (LadderId, &Ladder)> {
        self.ladders.iter().enumerate().map(|(i, l)| (LadderId(i), l))
    }
}
