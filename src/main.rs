//! Barrel Climb entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use barrel_climb::platform::{FrameDriver, InputTracker};
    use barrel_climb::renderer::CanvasRenderer;
    use barrel_climb::{Game, Tuning};

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        driver: FrameDriver,
        input: InputTracker,
        renderer: CanvasRenderer,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            self.driver.frame(&mut self.game, time, &mut self.input, &mut self.renderer);
            for event in self.game.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        fn suspend(&mut self, reason: &str) {
            if self.game.state() == barrel_climb::AppState::Playing {
                log::info!("Auto-paused ({})", reason);
            }
            self.game.auto_pause();
            // Key-up events are lost while unfocused
            self.input.release_all();
            self.driver.reset_clock();
        }
    }

    /// Tuning overrides from an inline `<script id="tuning" type="application/json">`
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document.get_element_by_id("tuning").and_then(|e| e.text_content()) else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Barrel Climb starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into::<HtmlCanvasElement>()?;

        let tuning = load_tuning(&document);
        let renderer = CanvasRenderer::new(&canvas, tuning.canvas_width as u32, tuning.canvas_height as u32)
            .ok_or("2d context unavailable")?;

        let seed = js_sys::Date::now() as u64;
        log::info!("Base seed {}", seed);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(tuning, seed),
            driver: FrameDriver::new(),
            input: InputTracker::new(),
            renderer,
        }));

        setup_keyboard(&window, app.clone());
        setup_auto_pause(&window, &document, app.clone());
        request_animation_frame(app);
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        for (name, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().input.handle_key_name(&event.key(), down) {
                    // Keep arrows/space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &web_sys::Document, app: Rc<RefCell<App>>) {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().suspend("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().suspend("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, stopping the frame loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Barrel Climb (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => barrel_climb::Tuning::from_json(&json).unwrap_or_else(|e| {
                log::error!("{}: {}, using defaults", path, e);
                barrel_climb::Tuning::default()
            }),
            Err(e) => {
                log::error!("{}: {}, using defaults", path, e);
                barrel_climb::Tuning::default()
            }
        },
        None => barrel_climb::Tuning::default(),
    };

    headless::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use barrel_climb::platform::{FrameDriver, InputTracker, Key};
    use barrel_climb::renderer::{Renderer, Snapshot};
    use barrel_climb::{AppState, Game, Tuning};

    /// Keeps the last frame for the summary
    #[derive(Default)]
    struct LastFrame(Option<Snapshot>);

    impl Renderer for LastFrame {
        fn draw(&mut self, snapshot: &Snapshot) {
            self.0 = Some(snapshot.clone());
        }
    }

    /// Scripted run: start, walk right, hop every second, stop at the first
    /// result screen or after a minute of 60 Hz frames
    pub fn run(tuning: Tuning) {
        let mut game = Game::new(tuning, 0x5eed);
        let mut driver = FrameDriver::new();
        let mut input = InputTracker::new();
        let mut last = LastFrame::default();

        input.key_down(Key::Confirm);
        input.key_down(Key::Right);
        for frame in 0..3600u32 {
            if frame % 60 == 30 {
                input.key_down(Key::Jump);
            } else if frame % 60 == 45 {
                input.key_up(Key::Jump);
            }

            driver.frame(&mut game, frame as f64 * 1000.0 / 60.0, &mut input, &mut last);
            for event in game.drain_events() {
                log::debug!("{:?}", event);
            }
            if matches!(game.state(), AppState::GameOver | AppState::LevelComplete) {
                break;
            }
        }

        if let Some(snapshot) = last.0 {
            println!(
                "{:?} after {:.1}s: score {}, lives {}, high score {}",
                snapshot.app_state, snapshot.elapsed, snapshot.score, snapshot.lives, snapshot.high_score
            );
        }
    }
}
