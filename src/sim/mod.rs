//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Injected random source only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod barrel;
pub mod collision;
pub mod geometry;
pub mod kong;
pub mod level;
pub mod physics;
pub mod pickup;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use barrel::{Barrel, BarrelState};
pub use collision::{AabbResult, Axis, PlatformHit, check_aabb, check_platform_collision};
pub use geometry::{Ladder, LadderId, Platform, Rect};
pub use kong::{Kong, KongPhase};
pub use level::Level;
pub use physics::{Body, apply_gravity, clamp_velocity, integrate};
pub use pickup::{Hammer, Princess};
pub use player::{AnimationState, Facing, Player, PlayerMotion};
pub use rng::{FixedRandom, RandomSource, SeededRandom};
pub use state::{GameEvent, GameState, Outcome};
pub use tick::{TickInput, tick};
