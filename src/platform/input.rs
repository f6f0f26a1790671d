//! Keyboard state tracking
//!
//! Turns raw key down/up events into held state plus edge-triggered presses,
//! and snapshots both into an `AppInput` for the next fixed step.

use serde::{Deserialize, Serialize};

use crate::game::{AppInput, MenuNav};
use crate::sim::TickInput;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Pause,
    Settings,
    Confirm,
}

impl Key {
    const COUNT: usize = 8;

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            " " | "Spacebar" => Some(Key::Jump),
            "p" | "P" | "Escape" => Some(Key::Pause),
            "o" | "O" => Some(Key::Settings),
            "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: [bool; Key::COUNT],
    /// Went down since the last `clear_pressed`
    pressed: [bool; Key::COUNT],
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat while held does not re-trigger.
    pub fn key_down(&mut self, key: Key) {
        let i = key.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Feed a DOM key name; returns true if the key is one of ours
    pub fn handle_key_name(&mut self, name: &str, down: bool) -> bool {
        match Key::from_key_name(name) {
            Some(key) if down => {
                self.key_down(key);
                true
            }
            Some(key) => {
                self.key_up(key);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Current intent for one fixed step
    pub fn snapshot(&self) -> AppInput {
        AppInput {
            tick: TickInput {
                left: self.is_held(Key::Left),
                right: self.is_held(Key::Right),
                up: self.is_held(Key::Up),
                down: self.is_held(Key::Down),
                jump_pressed: self.was_pressed(Key::Jump),
                jump_held: self.is_held(Key::Jump),
            },
            pause: self.was_pressed(Key::Pause),
            settings: self.was_pressed(Key::Settings),
            confirm: self.was_pressed(Key::Confirm),
            nav: MenuNav {
                up: self.was_pressed(Key::Up),
                down: self.was_pressed(Key::Down),
                left: self.was_pressed(Key::Left),
                right: self.was_pressed(Key::Right),
            },
        }
    }

    /// Consume edge-triggered presses after a step used them
    pub fn clear_pressed(&mut self) {
        self.pressed = [false; Key::COUNT];
    }

    /// Forget everything (focus lost: key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.held = [false; Key::COUNT];
        self.pressed = [false; Key::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_key_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_key_name("D"), Some(Key::Right));
        assert_eq!(Key::from_key_name(" "), Some(Key::Jump));
        assert_eq!(Key::from_key_name("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_key_name("p"), Some(Key::Pause));
        assert_eq!(Key::from_key_name("o"), Some(Key::Settings));
        assert_eq!(Key::from_key_name("Enter"), Some(Key::Confirm));
        assert_eq!(Key::from_key_name("F5"), None);
    }

    #[test]
    fn test_press_is_edge_triggered() {
        let mut tracker = InputTracker::new();
        tracker.key_down(Key::Jump);
        let input = tracker.snapshot();
        assert!(input.tick.jump_pressed && input.tick.jump_held);

        tracker.clear_pressed();
        // Auto-repeat
        tracker.key_down(Key::Jump);
        let input = tracker.snapshot();
        assert!(!input.tick.jump_pressed);
        assert!(input.tick.jump_held);

        tracker.key_up(Key::Jump);
        tracker.key_down(Key::Jump);
        assert!(tracker.snapshot().tick.jump_pressed);
    }

    #[test]
    fn test_directions_feed_movement_and_nav() {
        let mut tracker = InputTracker::new();
        assert!(tracker.handle_key_name("ArrowDown", true));
        let input = tracker.snapshot();
        assert!(input.tick.down && input.nav.down);
        tracker.clear_pressed();
        let input = tracker.snapshot();
        assert!(input.tick.down && !input.nav.down);
        assert!(!tracker.handle_key_name("Tab", true));
    }

    #[test]
    fn test_quick_tap_survives_until_consumed() {
        let mut tracker = InputTracker::new();
        tracker.key_down(Key::Pause);
        tracker.key_up(Key::Pause);
        assert!(tracker.snapshot().pause);
        tracker.release_all();
        assert!(!tracker.snapshot().pause);
    }
}
