//! Gameplay session state
//!
//! One `GameState` is one playthrough: every entity, the score, lives, and the
//! random source. It is created when play starts and dropped when the player
//! returns to the menu.

use serde::{Deserialize, Serialize};

use super::barrel::Barrel;
use super::kong::Kong;
use super::level::Level;
use super::pickup::{Hammer, Princess};
use super::player::Player;
use super::rng::{RandomSource, SeededRandom};
use crate::consts::BARREL_SIZE;
use crate::tuning::Tuning;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    LevelComplete,
    GameOver,
}

/// Notable things that happened during a tick, for audio/effects outside the
/// simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BarrelThrown { id: u32 },
    BarrelSmashed { id: u32 },
    BarrelJumped { id: u32 },
    PlayerHit { lives_left: u8 },
    HammerCollected,
    HammerExpired,
    LevelComplete { score: u64 },
    GameOver { score: u64 },
}

#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub level: Level,
    pub player: Player,
    pub kong: Kong,
    pub princess: Princess,
    /// Live barrels (sorted by id)
    pub barrels: Vec<Barrel>,
    pub hammers: Vec<Hammer>,
    pub lives: u8,
    pub score: u64,
    /// Seconds of simulated play
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(super) outcome: Option<Outcome>,
    /// Best height above the start reached so far (meters)
    pub(super) best_climb: u32,
    pub(super) goal_reached: bool,
    pub(super) events: Vec<GameEvent>,
    pub(super) rng: Box<dyn RandomSource>,
    next_id: u32,
}

impl GameState {
    /// New session on the classic stage
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let level = Level::classic(&tuning.ladder);
        Self::with_level(level, tuning, seed, Box::new(SeededRandom::new(seed)))
    }

    /// New session on a custom layout with an explicit random source
    pub fn with_level(level: Level, tuning: Tuning, seed: u64, mut rng: Box<dyn RandomSource>) -> Self {
        let player = Player::new(level.player_start);
        let kong = Kong::new(level.kong_pos, &tuning.kong, rng.as_mut());
        let princess = Princess::new(level.princess_pos);
        let hammers = level.hammer_spawns.iter().copied().map(Hammer::new).collect();
        let lives = tuning.player.starting_lives;

        log::info!("Session started (seed {}, {} lives)", seed, lives);

        Self {
            seed,
            tuning,
            level,
            player,
            kong,
            princess,
            barrels: Vec::new(),
            hammers,
            lives,
            score: 0,
            elapsed: 0.0,
            time_ticks: 0,
            outcome: None,
            best_climb: 0,
            goal_reached: false,
            events: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn active_barrel_count(&self) -> usize {
        self.barrels.iter().filter(|b| b.is_alive()).count()
    }

    /// Throw one barrel from the thrower's spawn point, respecting the cap.
    /// Returns the new barrel's id.
    pub fn spawn_barrel(&mut self) -> Option<u32> {
        if self.active_barrel_count() >= self.tuning.barrel.max_barrels {
            log::debug!("Barrel cap reached, throw skipped");
            return None;
        }
        let spawn = self.kong.spawn_point();
        let pos = glam::Vec2::new(spawn.x - BARREL_SIZE / 2.0, spawn.y - BARREL_SIZE);
        let id = self.next_entity_id();
        self.barrels.push(Barrel::new(id, pos, 1.0));
        self.events.push(GameEvent::BarrelThrown { id });
        log::debug!("Barrel {} thrown", id);
        Some(id)
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Seconds left for the time bonus
    pub fn time_remaining(&self) -> f32 {
        (self.tuning.score.level_time_limit - self.elapsed).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::FixedRandom;

    fn state() -> GameState {
        let tuning = Tuning::default();
        let level = Level::classic(&tuning.ladder);
        GameState::with_level(level, tuning, 1, Box::new(FixedRandom(0.5)))
    }

    #[test]
    fn test_new_session() {
        let state = state();
        assert_eq!(state.lives, state.tuning.player.starting_lives);
        assert_eq!(state.score, 0);
        assert!(state.barrels.is_empty());
        assert_eq!(state.hammers.len(), state.level.hammer_spawns.len());
        assert_eq!(state.player.body.pos, state.level.player_start);
        assert!(!state.is_over());
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut state = state();
        let cap = state.tuning.barrel.max_barrels;
        for _ in 0..cap {
            assert!(state.spawn_barrel().is_some());
        }
        assert!(state.spawn_barrel().is_none());
        assert_eq!(state.barrels.len(), cap);

        // Dead barrels don't count toward the cap
        state.barrels[0].destroy();
        assert!(state.spawn_barrel().is_some());
    }

    #[test]
    fn test_spawned_barrel_sits_at_spawn_point() {
        let mut state = state();
        let id = state.spawn_barrel().unwrap();
        let barrel = state.barrels.iter().find(|b| b.id == id).unwrap();
        let spawn = state.kong.spawn_point();
        assert_eq!(barrel.body.center_x(), spawn.x);
        assert_eq!(barrel.body.bottom(), spawn.y);
        assert_eq!(state.drain_events(), vec![GameEvent::BarrelThrown { id }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_ids_increase() {
        let mut state = state();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
