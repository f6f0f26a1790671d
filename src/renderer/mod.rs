//! Rendering boundary
//!
//! The game hands each backend a `Snapshot`; backends never read simulation
//! state directly.

pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use snapshot::{EntityView, SettingsRow, Snapshot, ViewKind};

/// A drawing backend, called once per display frame
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}
