//! Platform glue
//!
//! Browser-agnostic pieces of the shell:
//! - Keyboard mapping and edge detection
//! - Wall-clock to fixed-step conversion

pub mod input;
pub mod time;

pub use input::{InputTracker, Key};
pub use time::FrameDriver;
