//! Canvas 2D backend
//!
//! Flat-colour rectangles plus overlay text. Good enough to play; sprites are
//! a presentation concern this crate does not own.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wasm_bindgen::JsCast;

use super::{EntityView, Renderer, Snapshot, ViewKind};
use crate::game::AppState;

const BACKGROUND: &str = "#000010";
const OVERLAY: &str = "rgba(0, 0, 0, 0.6)";
const TEXT: &str = "#ffffff";
const ACCENT: &str = "#ffd84a";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2D context of `canvas`, sizing it to the playfield
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Option<Self> {
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn color(view: &EntityView) -> &'static str {
        match (view.kind, view.highlight) {
            (ViewKind::Platform, _) => "#d0306a",
            (ViewKind::Ladder, _) => "#30c8d0",
            (ViewKind::Player, false) => "#e83a2a",
            (ViewKind::Player, true) => "#ff9f1a",
            (ViewKind::Barrel, false) => "#a0642a",
            (ViewKind::Barrel, true) => "#c98a44",
            (ViewKind::Kong, false) => "#7a3b12",
            (ViewKind::Kong, true) => "#9c5220",
            (ViewKind::Hammer, _) => ACCENT,
            (ViewKind::Princess, _) => "#ff8ad8",
        }
    }

    fn draw_entity(&self, view: &EntityView) {
        if !view.visible {
            return;
        }
        let r = &view.rect;
        self.ctx.set_fill_style_str(Self::color(view));
        if view.kind == ViewKind::Barrel {
            let (cx, cy) = (r.x + r.width / 2.0, r.y + r.height / 2.0);
            self.ctx.save();
            let _ = self.ctx.translate(cx as f64, cy as f64);
            let _ = self.ctx.rotate(view.rotation as f64);
            self.ctx
                .fill_rect(-(r.width as f64) / 2.0, -(r.height as f64) / 2.0, r.width as f64, r.height as f64);
            self.ctx.restore();
        } else {
            self.ctx.fill_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
        }
    }

    fn text(&self, text: &str, x: f64, y: f64, size: u32, color: &str, align: &str) {
        self.ctx.set_font(&format!("{}px monospace", size));
        self.ctx.set_text_align(align);
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_hud(&self, s: &Snapshot) {
        self.text(&format!("SCORE {:06}", s.score), 12.0, 24.0, 16, TEXT, "left");
        self.text(&format!("HIGH {:06}", s.high_score), s.width as f64 / 2.0, 24.0, 16, TEXT, "center");
        self.text(&format!("LIVES {}", s.lives), s.width as f64 - 12.0, 24.0, 16, TEXT, "right");
        self.text(&format!("TIME {:>3}", s.time_remaining.floor() as u32), s.width as f64 - 12.0, 44.0, 14, TEXT, "right");
        if let Some(fps) = s.fps {
            self.text(&format!("{} FPS", fps), 12.0, s.height as f64 - 12.0, 12, TEXT, "left");
        }
    }

    fn draw_overlay(&self, s: &Snapshot, title: &str, lines: &[String]) {
        let (w, h) = (s.width as f64, s.height as f64);
        self.ctx.set_fill_style_str(OVERLAY);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.text(title, w / 2.0, h / 2.0 - 40.0, 36, ACCENT, "center");
        for (i, line) in lines.iter().enumerate() {
            self.text(line, w / 2.0, h / 2.0 + i as f64 * 26.0, 18, TEXT, "center");
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, s: &Snapshot) {
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, s.width as f64, s.height as f64);

        for view in &s.entities {
            self.draw_entity(view);
        }
        if s.app_state.has_session() {
            self.draw_hud(s);
        }

        match s.app_state {
            AppState::Menu => self.draw_overlay(
                s,
                "BARREL CLIMB",
                &[
                    "Press Enter or Space to start".to_string(),
                    "Arrows/WASD move, Space jumps".to_string(),
                    format!("High score {}", s.high_score),
                ],
            ),
            AppState::Playing => {}
            AppState::Paused => self.draw_overlay(
                s,
                "PAUSED",
                &["P to resume".to_string(), "O for settings".to_string()],
            ),
            AppState::Settings => {
                let lines: Vec<String> = s
                    .settings
                    .iter()
                    .map(|row| {
                        let marker = if row.selected { ">" } else { " " };
                        format!("{} {:<12} < {} >", marker, row.label, row.value)
                    })
                    .collect();
                self.draw_overlay(s, "SETTINGS", &lines);
            }
            AppState::GameOver => self.draw_overlay(
                s,
                "GAME OVER",
                &[format!("Score {}", s.score), "Press Enter".to_string()],
            ),
            AppState::LevelComplete => self.draw_overlay(
                s,
                "LEVEL COMPLETE",
                &[format!("Score {}", s.score), "Press Enter".to_string()],
            ),
        }
    }
}
