//! Data-driven game balance
//!
//! Every number the simulation reads lives here. A `Tuning` is built once
//! (defaults, or a JSON override) and passed by reference into each update, so
//! tests can run the same code with different values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Error produced when loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    /// JSON did not parse
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is out of range
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Player movement values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Top horizontal speed (px/s)
    pub walk_speed: f32,
    /// Ground acceleration toward walk speed (px/s²)
    pub acceleration: f32,
    /// Deceleration when input opposes current motion (px/s²)
    pub deceleration: f32,
    /// Ground friction with no horizontal input (px/s²)
    pub friction: f32,
    /// Fraction of ground acceleration available in the air
    pub air_control: f32,
    /// Ladder speed (px/s)
    pub climb_speed: f32,
    /// Initial jump velocity (negative is up)
    pub jump_velocity: f32,
    /// Applied once to upward velocity when jump is released early
    pub jump_cut_multiplier: f32,
    /// Seconds of invincibility after a hit
    pub invincibility_duration: f32,
    /// Seconds the hammer lasts
    pub hammer_duration: f32,
    /// How far the hammer reaches past the player's body (px)
    pub hammer_reach: f32,
    pub starting_lives: u8,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            walk_speed: 150.0,
            acceleration: 1200.0,
            deceleration: 1800.0,
            friction: 1500.0,
            air_control: 0.5,
            climb_speed: 100.0,
            jump_velocity: -380.0,
            jump_cut_multiplier: 0.5,
            invincibility_duration: 2.0,
            hammer_duration: 10.0,
            hammer_reach: 24.0,
            starting_lives: 3,
        }
    }
}

/// Barrel behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrelTuning {
    pub roll_speed: f32,
    /// Speed while sliding down a ladder
    pub fall_speed: f32,
    /// Probability of taking a ladder, rolled once per encounter
    pub ladder_fall_chance: f32,
    /// Per-frame probability of dropping early near a platform edge
    pub edge_fall_chance: f32,
    /// Distance from a platform edge that counts as "near" (px)
    pub edge_distance: f32,
    /// Vertical band around a ladder top in which a barrel can take it (px)
    pub ladder_top_band: f32,
    /// Concurrent barrel cap
    pub max_barrels: usize,
}

impl Default for BarrelTuning {
    fn default() -> Self {
        Self {
            roll_speed: 120.0,
            fall_speed: 150.0,
            ladder_fall_chance: 0.4,
            edge_fall_chance: 0.1,
            edge_distance: 10.0,
            ladder_top_band: 4.0,
            max_barrels: 6,
        }
    }
}

/// Barrel thrower cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KongTuning {
    pub spawn_min_delay: f32,
    pub spawn_max_delay: f32,
    pub throw_animation_duration: f32,
}

impl Default for KongTuning {
    fn default() -> Self {
        Self {
            spawn_min_delay: 2.0,
            spawn_max_delay: 4.0,
            throw_animation_duration: 0.5,
        }
    }
}

/// Ladder tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderTuning {
    /// Max distance between entity centre and ladder centre to mount (px)
    pub snap_distance: f32,
    /// Tolerance band above the top and below the bottom (px)
    pub entry_zone_height: f32,
    /// Widens the stay-on-ladder zone past the visual width (px)
    pub collision_padding: f32,
}

impl Default for LadderTuning {
    fn default() -> Self {
        Self {
            snap_distance: 16.0,
            entry_zone_height: 16.0,
            collision_padding: 8.0,
        }
    }
}

/// Points table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub points_barrel_smash: u64,
    pub points_barrel_jump: u64,
    pub points_reach_princess: u64,
    /// Per remaining second when the goal is reached
    pub points_time_bonus: u64,
    pub points_per_meter: u64,
    pub pixels_per_meter: f32,
    /// Seconds before the time bonus runs out
    pub level_time_limit: f32,
    /// Max gap between player bottom and barrel top that counts as a jump-over (px)
    pub jump_clear_height: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            points_barrel_smash: 300,
            points_barrel_jump: 100,
            points_reach_princess: 1000,
            points_time_bonus: 10,
            points_per_meter: 10,
            pixels_per_meter: 30.0,
            level_time_limit: 120.0,
            jump_clear_height: 64.0,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical speed cap in both directions (px/s)
    pub max_fall_speed: f32,
    /// How far below a platform top a falling body may be and still land (px)
    pub platform_snap_tolerance: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player: PlayerTuning,
    pub barrel: BarrelTuning,
    pub kong: KongTuning,
    pub ladder: LadderTuning,
    pub score: ScoreTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1200.0,
            max_fall_speed: 600.0,
            platform_snap_tolerance: 8.0,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player: PlayerTuning::default(),
            barrel: BarrelTuning::default(),
            kong: KongTuning::default(),
            ladder: LadderTuning::default(),
            score: ScoreTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason: "must be a positive number" })
            }
        }
        fn probability(field: &'static str, v: f32) -> Result<(), TuningError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason: "must be within [0, 1]" })
            }
        }

        positive("gravity", self.gravity)?;
        positive("max_fall_speed", self.max_fall_speed)?;
        positive("platform_snap_tolerance", self.platform_snap_tolerance)?;
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;

        let p = &self.player;
        positive("player.walk_speed", p.walk_speed)?;
        positive("player.acceleration", p.acceleration)?;
        positive("player.deceleration", p.deceleration)?;
        positive("player.friction", p.friction)?;
        probability("player.air_control", p.air_control)?;
        positive("player.climb_speed", p.climb_speed)?;
        if !(p.jump_velocity.is_finite() && p.jump_velocity < 0.0) {
            return Err(TuningError::Invalid {
                field: "player.jump_velocity",
                reason: "must be negative (upward)",
            });
        }
        if !(p.jump_cut_multiplier > 0.0 && p.jump_cut_multiplier < 1.0) {
            return Err(TuningError::Invalid {
                field: "player.jump_cut_multiplier",
                reason: "must be within (0, 1)",
            });
        }
        positive("player.invincibility_duration", p.invincibility_duration)?;
        positive("player.hammer_duration", p.hammer_duration)?;
        if p.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "player.starting_lives",
                reason: "must be at least 1",
            });
        }

        let b = &self.barrel;
        positive("barrel.roll_speed", b.roll_speed)?;
        positive("barrel.fall_speed", b.fall_speed)?;
        probability("barrel.ladder_fall_chance", b.ladder_fall_chance)?;
        probability("barrel.edge_fall_chance", b.edge_fall_chance)?;
        if b.max_barrels == 0 {
            return Err(TuningError::Invalid {
                field: "barrel.max_barrels",
                reason: "must be at least 1",
            });
        }

        let k = &self.kong;
        positive("kong.spawn_min_delay", k.spawn_min_delay)?;
        positive("kong.spawn_max_delay", k.spawn_max_delay)?;
        positive("kong.throw_animation_duration", k.throw_animation_duration)?;
        if k.spawn_min_delay > k.spawn_max_delay {
            return Err(TuningError::Invalid {
                field: "kong.spawn_min_delay",
                reason: "must not exceed spawn_max_delay",
            });
        }

        positive("ladder.snap_distance", self.ladder.snap_distance)?;
        positive("score.pixels_per_meter", self.score.pixels_per_meter)?;
        positive("score.level_time_limit", self.score.level_time_limit)?;

        Ok(())
    }
}
