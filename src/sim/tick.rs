//! Per-frame session update
//!
//! The update order is fixed so collision outcomes are reproducible:
//! thrower, player, barrels, hammers, cross-entity collisions, end checks.

use serde::{Deserialize, Serialize};

use super::collision::check_aabb;
use super::geometry::Rect;
use super::player::Player;
use super::state::{GameEvent, GameState, Outcome};
use crate::consts::PLAYER_HEIGHT;

/// Input intent for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Edge-triggered: true only on the tick the jump key went down
    pub jump_pressed: bool,
    pub jump_held: bool,
}

impl TickInput {
    /// -1, 0, or 1; opposing keys cancel
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// -1 (up), 0, or 1 (down)
    pub fn vertical(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the session by `dt` seconds. Does nothing once the session has an
/// outcome.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_over() {
        return;
    }
    if !(dt.is_finite() && dt > 0.0) {
        log::warn!("tick: ignoring invalid dt {}", dt);
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    // Thrower
    if state.kong.update(&state.tuning.kong, state.rng.as_mut(), dt) {
        state.spawn_barrel();
    }

    // Player
    let update = state.player.update(input, &state.level, &state.tuning, dt);
    if update.hammer_expired {
        state.events.push(GameEvent::HammerExpired);
    }

    // Barrels
    for barrel in &mut state.barrels {
        barrel.update(&state.level, &state.tuning, state.rng.as_mut(), dt);
    }
    state.barrels.retain(|b| b.is_alive());

    // Hammers (animation only)
    for hammer in &mut state.hammers {
        hammer.update(dt);
    }

    resolve_barrels(state);
    resolve_pickups(state);
    award_climb(state);
    check_end(state);
}

/// Player vs barrel: smash with the hammer, take a hit, or score a jump-over
fn resolve_barrels(state: &mut GameState) {
    let tuning = &state.tuning;
    let player_rect = state.player.rect();
    let hammer_box = state.player.hammer_hitbox(tuning.player.hammer_reach);

    for barrel in &mut state.barrels {
        let barrel_rect = barrel.rect();

        let smashed = hammer_box.is_some_and(|hb| check_aabb(&hb, &barrel_rect).colliding);
        if smashed {
            barrel.destroy();
            state.score += tuning.score.points_barrel_smash;
            state.events.push(GameEvent::BarrelSmashed { id: barrel.id });
            log::debug!("Barrel {} smashed", barrel.id);
            continue;
        }

        if check_aabb(&player_rect, &barrel_rect).colliding {
            if state.player.take_damage(&tuning.player) {
                state.lives = state.lives.saturating_sub(1);
                barrel.destroy();
                state.events.push(GameEvent::PlayerHit { lives_left: state.lives });
                log::info!("Player hit by barrel {}, {} lives left", barrel.id, state.lives);
            }
            continue;
        }

        if !barrel.jumped && cleared_by_jump(&state.player, &barrel_rect, tuning.score.jump_clear_height) {
            barrel.jumped = true;
            state.score += tuning.score.points_barrel_jump;
            state.events.push(GameEvent::BarrelJumped { id: barrel.id });
        }
    }

    state.barrels.retain(|b| b.is_alive());
}

/// Jump-over rule: the player is airborne (not on a ladder), directly above the
/// barrel with their spans overlapping, and no more than `clear_height` over it.
fn cleared_by_jump(player: &Player, barrel: &Rect, clear_height: f32) -> bool {
    if player.is_on_ground() || player.is_climbing() {
        return false;
    }
    let rect = player.rect();
    let gap = barrel.top() - rect.bottom();
    rect.overlaps_x(barrel) && gap >= 0.0 && gap <= clear_height
}

/// Player vs hammers and goal
fn resolve_pickups(state: &mut GameState) {
    let player_rect = state.player.rect();

    for hammer in &mut state.hammers {
        if hammer.is_collected {
            continue;
        }
        if check_aabb(&player_rect, &hammer.rect()).colliding {
            hammer.is_collected = true;
            state.player.pickup_hammer(&state.tuning.player);
            state.events.push(GameEvent::HammerCollected);
            log::info!("Hammer collected");
        }
    }

    if check_aabb(&player_rect, &state.princess.rect()).colliding {
        state.goal_reached = true;
    }
}

/// Points for each new meter of height above the start, measured only while
/// standing or on a ladder so jumps don't count
fn award_climb(state: &mut GameState) {
    if !(state.player.is_on_ground() || state.player.is_climbing()) {
        return;
    }
    let start_bottom = state.level.player_start.y + PLAYER_HEIGHT;
    let climbed = (start_bottom - state.player.body.bottom()) / state.tuning.score.pixels_per_meter;
    if !climbed.is_finite() || climbed <= 0.0 {
        return;
    }
    let meters = climbed.floor() as u32;
    if meters > state.best_climb {
        state.score += u64::from(meters - state.best_climb) * state.tuning.score.points_per_meter;
        state.best_climb = meters;
    }
}

fn check_end(state: &mut GameState) {
    if state.lives == 0 {
        state.outcome = Some(Outcome::GameOver);
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over, final score {}", state.score);
        return;
    }

    if state.goal_reached {
        let score = &state.tuning.score;
        let bonus = state.time_remaining().floor() as u64 * score.points_time_bonus;
        state.score += score.points_reach_princess + bonus;
        state.outcome = Some(Outcome::LevelComplete);
        state.events.push(GameEvent::LevelComplete { score: state.score });
        log::info!("Level complete in {:.1}s, score {} (time bonus {})", state.elapsed, state.score, bonus);
    }
}
