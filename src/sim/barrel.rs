//! Barrels
//!
//! A barrel is thrown, lands, rolls along a girder, and then either drops off
//! the end, takes a ladder down, or (on the ground floor) rolls off screen.
//! Each descent reverses its roll direction so it zig-zags down the stage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::check_platform_collision;
use super::geometry::{LadderId, Platform, Rect};
use super::level::Level;
use super::physics::{Body, apply_gravity, clamp_velocity, integrate};
use super::rng::RandomSource;
use crate::consts::BARREL_SIZE;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarrelState {
    /// Under gravity. `from_roll` is set when it left a girder by rolling or
    /// dropping, which reverses it on landing; thrown barrels keep direction.
    Falling { from_roll: bool },
    Rolling,
    /// Sliding straight down a ladder
    OnLadder { ladder: LadderId },
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrel {
    pub id: u32,
    pub body: Body,
    /// -1 rolls left, 1 rolls right
    direction: f32,
    state: BarrelState,
    /// Girder the barrel dropped off of, ignored until it lands elsewhere
    dropping_from: Option<usize>,
    /// Ladder whose fall chance has already been rolled this encounter
    ladder_encounter: Option<LadderId>,
    /// Jump-over points already awarded
    pub jumped: bool,
    /// Visual spin (radians)
    pub rotation: f32,
}

impl Barrel {
    /// A freshly thrown barrel with its top-left at `pos`
    pub fn new(id: u32, pos: Vec2, direction: f32) -> Self {
        Self {
            id,
            body: Body::new(pos, Vec2::splat(BARREL_SIZE)),
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            state: BarrelState::Falling { from_roll: false },
            dropping_from: None,
            ladder_encounter: None,
            jumped: false,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn state(&self) -> BarrelState {
        self.state
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.state != BarrelState::Dead
    }

    pub fn is_rolling(&self) -> bool {
        self.state == BarrelState::Rolling
    }

    pub fn is_on_ladder(&self) -> bool {
        matches!(self.state, BarrelState::OnLadder { .. })
    }

    pub fn current_ladder(&self) -> Option<LadderId> {
        match self.state {
            BarrelState::OnLadder { ladder } => Some(ladder),
            _ => None,
        }
    }

    /// Flag for removal by the owning session
    pub fn destroy(&mut self) {
        self.state = BarrelState::Dead;
    }

    /// Advance one frame
    pub fn update(&mut self, level: &Level, tuning: &Tuning, rng: &mut dyn RandomSource, dt: f32) {
        if !self.is_alive() {
            return;
        }
        if !self.body.is_valid() {
            log::warn!("Barrel {} has invalid body {:?}, discarding", self.id, self.body);
            self.destroy();
            return;
        }

        match self.state {
            BarrelState::OnLadder { ladder } => self.update_on_ladder(ladder, level, tuning, dt),
            BarrelState::Rolling | BarrelState::Falling { .. } => self.update_free(level, tuning, rng, dt),
            BarrelState::Dead => {}
        }

        if self.is_rolling() {
            self.rotation += self.body.vel.x * dt / (self.body.size.x / 2.0);
        }

        let out_left = self.body.pos.x < -self.body.size.x;
        let out_right = self.body.pos.x > tuning.canvas_width + self.body.size.x;
        let out_bottom = self.body.pos.y > tuning.canvas_height + self.body.size.y;
        if out_left || out_right || out_bottom {
            self.destroy();
        }
    }

    fn update_on_ladder(&mut self, id: LadderId, level: &Level, tuning: &Tuning, dt: f32) {
        let Some(ladder) = level.ladder(id) else {
            self.state = BarrelState::Falling { from_roll: true };
            return;
        };

        self.body.vel = Vec2::new(0.0, tuning.barrel.fall_speed);
        integrate(&mut self.body, dt);

        if self.body.bottom() >= ladder.bottom() {
            self.body.pos.y = ladder.bottom() - self.body.size.y;
            self.direction = -self.direction;
            self.start_rolling(tuning);
        }
    }

    fn update_free(&mut self, level: &Level, tuning: &Tuning, rng: &mut dyn RandomSource, dt: f32) {
        apply_gravity(&mut self.body, tuning.gravity, dt);
        clamp_velocity(&mut self.body, tuning.max_fall_speed);
        if self.is_rolling() {
            self.body.vel.x = tuning.barrel.roll_speed * self.direction;
        }
        integrate(&mut self.body, dt);

        let landing = level
            .platforms
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != self.dropping_from)
            .find_map(|(i, platform)| {
                let hit = check_platform_collision(&self.body, platform, tuning.platform_snap_tolerance);
                hit.colliding.then_some((i, hit.snap_y))
            });

        let Some((index, snap_y)) = landing else {
            if self.is_rolling() {
                // Rolled past the end of the girder
                self.state = BarrelState::Falling { from_roll: true };
                self.ladder_encounter = None;
            }
            return;
        };

        if self.state == (BarrelState::Falling { from_roll: true }) {
            self.direction = -self.direction;
        }
        self.body.pos.y = snap_y;
        self.start_rolling(tuning);

        let platform = &level.platforms[index];
        if self.near_edge(platform, tuning) && rng.chance(tuning.barrel.edge_fall_chance) {
            self.state = BarrelState::Falling { from_roll: true };
            self.dropping_from = Some(index);
            self.ladder_encounter = None;
            return;
        }

        self.check_ladders(level, tuning, rng);
    }

    fn start_rolling(&mut self, tuning: &Tuning) {
        self.state = BarrelState::Rolling;
        self.body.vel = Vec2::new(tuning.barrel.roll_speed * self.direction, 0.0);
        self.dropping_from = None;
    }

    /// Leading edge within `edge_distance` of the girder end it is heading for
    fn near_edge(&self, platform: &Platform, tuning: &Tuning) -> bool {
        let rect = self.rect();
        let gap = if self.direction > 0.0 {
            platform.rect().right() - rect.right()
        } else {
            rect.left() - platform.rect().left()
        };
        gap <= tuning.barrel.edge_distance
    }

    /// Roll the ladder-fall chance once per ladder encounter. Only the first
    /// matching ladder is considered.
    fn check_ladders(&mut self, level: &Level, tuning: &Tuning, rng: &mut dyn RandomSource) {
        let center_x = self.body.center_x();
        let bottom = self.body.bottom();
        let band = tuning.barrel.ladder_top_band;

        let matched = level.ladders_with_ids().find(|(_, ladder)| {
            (center_x - ladder.center_x()).abs() <= ladder.rect().width / 2.0
                && (bottom - ladder.top()).abs() <= band
        });

        let Some((id, ladder)) = matched else {
            self.ladder_encounter = None;
            return;
        };
        if self.ladder_encounter == Some(id) {
            return;
        }
        self.ladder_encounter = Some(id);

        if rng.chance(tuning.barrel.ladder_fall_chance) {
            self.state = BarrelState::OnLadder { ladder: id };
            self.body.vel = Vec2::new(0.0, tuning.barrel.fall_speed);
            self.body.pos.x = ladder.center_x() - self.body.size.x / 2.0;
            log::debug!("Barrel {} taking ladder {}", self.id, id.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::geometry::{Ladder, Platform};
    use crate::sim::rng::FixedRandom;

    /// Upper girder y=300 (x 0..600), lower girder y=400 (x 0..800),
    /// ladder between them at x 300..330
    fn test_level(tuning: &Tuning) -> Level {
        Level {
            platforms: vec![
                Platform::new(0.0, 300.0, 600.0, 16.0),
                Platform::new(0.0, 400.0, 800.0, 16.0),
            ],
            ladders: vec![Ladder::new(300.0, 300.0, 30.0, 100.0, &tuning.ladder)],
            player_start: Vec2::ZERO,
            kong_pos: Vec2::ZERO,
            princess_pos: Vec2::ZERO,
            hammer_spawns: Vec::new(),
        }
    }

    /// Counts how many random numbers were drawn
    #[derive(Debug)]
    struct CountingRandom {
        value: f32,
        draws: usize,
    }

    impl RandomSource for CountingRandom {
        fn next_f32(&mut self) -> f32 {
            self.draws += 1;
            self.value
        }
    }

    fn run(barrel: &mut Barrel, level: &Level, tuning: &Tuning, rng: &mut dyn RandomSource, frames: usize) {
        for _ in 0..frames {
            barrel.update(level, tuning, rng, SIM_DT);
        }
    }

    #[test]
    fn test_thrown_barrel_lands_and_rolls_forward() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        let mut barrel = Barrel::new(1, Vec2::new(50.0, 250.0), 1.0);
        let mut rng = FixedRandom(0.999);
        run(&mut barrel, &level, &tuning, &mut rng, 60);
        assert!(barrel.is_rolling());
        assert_eq!(barrel.direction(), 1.0);
        assert_eq!(barrel.body.bottom(), 300.0);
        assert_eq!(barrel.body.vel.x, tuning.barrel.roll_speed);
        assert!(barrel.body.pos.x > 50.0);
    }

    #[test]
    fn test_leaving_canvas_kills_in_same_update() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        let mut rng = FixedRandom(0.999);

        let mut left = Barrel::new(1, Vec2::new(-BARREL_SIZE - 0.5, 100.0), -1.0);
        left.update(&level, &tuning, &mut rng, SIM_DT);
        assert!(!left.is_alive());

        let mut right = Barrel::new(2, Vec2::new(tuning.canvas_width + BARREL_SIZE + 0.5, 100.0), 1.0);
        right.update(&level, &tuning, &mut rng, SIM_DT);
        assert!(!right.is_alive());

        let mut below = Barrel::new(3, Vec2::new(100.0, tuning.canvas_height + BARREL_SIZE), 1.0);
        below.update(&level, &tuning, &mut rng, SIM_DT);
        assert!(!below.is_alive());
    }

    #[test]
    fn test_dead_barrel_does_not_move() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        let mut barrel = Barrel::new(1, Vec2::new(50.0, 50.0), 1.0);
        barrel.destroy();
        let before = barrel.body;
        barrel.update(&level, &tuning, &mut FixedRandom(0.5), SIM_DT);
        assert_eq!(barrel.body, before);
    }

    fn rolling_toward_ladder(level: &Level, tuning: &Tuning) -> Barrel {
        let mut barrel = Barrel::new(1, Vec2::new(250.0, 300.0 - BARREL_SIZE), 1.0);
        barrel.update(level, tuning, &mut FixedRandom(0.999), SIM_DT);
        assert!(barrel.is_rolling());
        barrel
    }

    #[test]
    fn test_takes_ladder_when_chance_succeeds() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        let mut barrel = rolling_toward_ladder(&level, &tuning);

        // Stays away from girder edges, so only the ladder roll can succeed
        let mut rng = FixedRandom(0.0);
        let mut took = false;
        for _ in 0..60 {
            barrel.update(&level, &tuning, &mut rng, SIM_DT);
            if barrel.is_on_ladder() {
                took = true;
                break;
            }
        }
        assert!(took);
        assert_eq!(barrel.current_ladder(), Some(LadderId(0)));
        assert_eq!(barrel.body.vel, Vec2::new(0.0, tuning.barrel.fall_speed));
        assert_eq!(barrel.body.center_x(), level.ladders[0].center_x());

        // Slides through the lower girder's top and resumes rolling, reversed
        run(&mut barrel, &level, &tuning, &mut FixedRandom(0.999), 120);
        assert!(barrel.is_rolling());
        assert_eq!(barrel.current_ladder(), None);
        assert_eq!(barrel.direction(), -1.0);
        assert_eq!(barrel.body.bottom(), 400.0);
    }

    #[test]
    fn test_skips_ladder_when_chance_fails() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        let mut barrel = rolling_toward_ladder(&level, &tuning);
        run(&mut barrel, &level, &tuning, &mut FixedRandom(0.999), 120);
        assert!(barrel.is_rolling());
        assert!(barrel.body.pos.x > 330.0);
        assert_eq!(barrel.body.bottom(), 300.0);
    }

    #[test]
    fn test_ladder_chance_rolled_once_per_encounter() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        let mut barrel = rolling_toward_ladder(&level, &tuning);
        let mut rng = CountingRandom { value: 0.999, draws: 0 };
        // ~100px of travel: crosses the whole ladder, nowhere near a girder end
        run(&mut barrel, &level, &tuning, &mut rng, 100);
        assert!(barrel.body.pos.x > 330.0);
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn test_edge_drop_reverses_on_landing() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        // Right end of the upper girder is x=600; start 8px from it
        let mut barrel = Barrel::new(1, Vec2::new(600.0 - BARREL_SIZE - 8.0, 300.0 - BARREL_SIZE), 1.0);
        barrel.update(&level, &tuning, &mut FixedRandom(0.0), SIM_DT);
        assert_eq!(barrel.state(), BarrelState::Falling { from_roll: true });

        // Drops past the girder it left even though it still overlaps it
        run(&mut barrel, &level, &tuning, &mut FixedRandom(0.999), 120);
        assert!(barrel.is_rolling());
        assert_eq!(barrel.direction(), -1.0);
        assert_eq!(barrel.body.bottom(), 400.0);
    }

    #[test]
    fn test_rolling_off_the_end_falls_and_reverses() {
        let tuning = Tuning::default();
        let level = test_level(&tuning);
        let mut barrel = Barrel::new(1, Vec2::new(500.0, 300.0 - BARREL_SIZE), 1.0);
        // Never drops early; has to roll all the way off
        run(&mut barrel, &level, &tuning, &mut FixedRandom(0.999), 240);
        assert!(barrel.is_rolling());
        assert_eq!(barrel.body.bottom(), 400.0);
        assert_eq!(barrel.direction(), -1.0);
    }

    #[test]
    fn test_stale_ladder_id_drops_barrel() {
        let tuning = Tuning::default();
        let mut level = test_level(&tuning);
        let mut barrel = rolling_toward_ladder(&level, &tuning);
        let mut rng = FixedRandom(0.0);
        for _ in 0..60 {
            barrel.update(&level, &tuning, &mut rng, SIM_DT);
            if barrel.is_on_ladder() {
                break;
            }
        }
        assert!(barrel.is_on_ladder());
        level.ladders.clear();
        barrel.update(&level, &tuning, &mut rng, SIM_DT);
        assert_eq!(barrel.current_ladder(), None);
    }
}
