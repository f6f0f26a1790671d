//! Read-only frame description
//!
//! Everything a drawing backend needs, flattened out of the game so the
//! backend never touches simulation types beyond plain enums.

use serde::Serialize;

use crate::game::{AppState, Game};
use crate::settings::SettingsOption;
use crate::sim::{AnimationState, BarrelState, Facing, GameState, KongPhase, Rect};

/// Blink rate of the player while invincible (toggles per second)
const BLINK_RATE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewKind {
    Platform,
    Ladder,
    Player,
    Barrel,
    Kong,
    Hammer,
    Princess,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: ViewKind,
    pub rect: Rect,
    pub facing: Option<Facing>,
    pub animation: Option<AnimationState>,
    /// Barrel spin (radians)
    pub rotation: f32,
    /// Alternate look: player holding the hammer, kong mid-throw, barrel on a
    /// ladder
    pub highlight: bool,
    pub visible: bool,
}

impl EntityView {
    fn plain(kind: ViewKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            facing: None,
            animation: None,
            rotation: 0.0,
            highlight: false,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsRow {
    pub label: &'static str,
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub app_state: AppState,
    pub score: u64,
    pub lives: u8,
    pub high_score: u64,
    pub elapsed: f32,
    pub time_remaining: f32,
    /// Present when the FPS counter is enabled
    pub fps: Option<u32>,
    pub width: f32,
    pub height: f32,
    /// Draw order: level, pickups, kong, barrels, player
    pub entities: Vec<EntityView>,
    /// Only filled on the settings screen
    pub settings: Vec<SettingsRow>,
}

impl Snapshot {
    pub fn capture(game: &Game, fps: Option<u32>) -> Self {
        let session = game.session();
        let settings = if game.state() == AppState::Settings {
            let cursor = game.settings_cursor();
            SettingsOption::ALL
                .iter()
                .map(|&option| SettingsRow {
                    label: option.label(),
                    value: game.settings().value_label(option),
                    selected: option == cursor,
                })
                .collect()
        } else {
            Vec::new()
        };

        let (width, height) = session
            .map(|s| (s.tuning.canvas_width, s.tuning.canvas_height))
            .unwrap_or((crate::consts::CANVAS_WIDTH, crate::consts::CANVAS_HEIGHT));

        Self {
            app_state: game.state(),
            score: session.map(|s| s.score).unwrap_or(0),
            lives: session.map(|s| s.lives).unwrap_or(0),
            high_score: game.high_score(),
            elapsed: session.map(|s| s.elapsed).unwrap_or(0.0),
            time_remaining: session.map(GameState::time_remaining).unwrap_or(0.0),
            fps,
            width,
            height,
            entities: session.map(entity_views).unwrap_or_default(),
            settings,
        }
    }
}

fn entity_views(state: &GameState) -> Vec<EntityView> {
    let mut views = Vec::with_capacity(state.level.platforms.len() + state.level.ladders.len() + state.barrels.len() + 8);

    views.extend(state.level.ladders.iter().map(|l| EntityView::plain(ViewKind::Ladder, *l.rect())));
    views.extend(state.level.platforms.iter().map(|p| EntityView::plain(ViewKind::Platform, *p.rect())));

    for hammer in &state.hammers {
        let mut rect = hammer.rect();
        rect.y += hammer.bob_offset();
        views.push(EntityView {
            visible: !hammer.is_collected,
            ..EntityView::plain(ViewKind::Hammer, rect)
        });
    }

    views.push(EntityView::plain(ViewKind::Princess, state.princess.rect()));
    views.push(EntityView {
        highlight: state.kong.phase() == KongPhase::Throw,
        ..EntityView::plain(ViewKind::Kong, state.kong.rect())
    });

    for barrel in state.barrels.iter().filter(|b| b.is_alive()) {
        views.push(EntityView {
            rotation: barrel.rotation,
            highlight: matches!(barrel.state(), BarrelState::OnLadder { .. }),
            ..EntityView::plain(ViewKind::Barrel, barrel.rect())
        });
    }

    let player = &state.player;
    let blink_on = ((player.invincibility_timer() * BLINK_RATE) as u32) % 2 == 0;
    views.push(EntityView {
        facing: Some(player.facing()),
        animation: Some(player.animation_state()),
        highlight: player.has_hammer(),
        visible: !player.is_invincible() || blink_on,
        ..EntityView::plain(ViewKind::Player, player.rect())
    });

    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::game::AppInput;
    use crate::sim::FixedRandom;
    use crate::tuning::Tuning;

    fn playing() -> Game {
        let mut game = Game::new(Tuning::default(), 3).with_random(|_| Box::new(FixedRandom(0.5)));
        let start = AppInput { confirm: true, ..Default::default() };
        game.update(SIM_DT, &start);
        game
    }

    #[test]
    fn test_menu_has_no_entities() {
        let game = Game::new(Tuning::default(), 3);
        let snapshot = Snapshot::capture(&game, None);
        assert_eq!(snapshot.app_state, AppState::Menu);
        assert!(snapshot.entities.is_empty());
        assert_eq!(snapshot.lives, 0);
    }

    #[test]
    fn test_session_views() {
        let game = playing();
        let snapshot = Snapshot::capture(&game, Some(60));
        let session = game.session().unwrap();
        let count = |kind| snapshot.entities.iter().filter(|e| e.kind == kind).count();
        assert_eq!(count(ViewKind::Platform), session.level.platforms.len());
        assert_eq!(count(ViewKind::Ladder), session.level.ladders.len());
        assert_eq!(count(ViewKind::Player), 1);
        assert_eq!(count(ViewKind::Kong), 1);
        assert_eq!(snapshot.entities.last().map(|e| e.kind), Some(ViewKind::Player));
        assert_eq!(snapshot.lives, session.lives);
        assert_eq!(snapshot.fps, Some(60));
    }

    #[test]
    fn test_collected_hammer_hidden() {
        let mut game = playing();
        game.session_mut().unwrap().hammers[0].is_collected = true;
        let snapshot = Snapshot::capture(&game, None);
        let hammers: Vec<_> = snapshot.entities.iter().filter(|e| e.kind == ViewKind::Hammer).collect();
        assert!(!hammers[0].visible);
        assert!(hammers[1].visible);
    }

    #[test]
    fn test_serializes_to_json() {
        let snapshot = Snapshot::capture(&playing(), None);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"app_state\":\"Playing\""));
    }
}
