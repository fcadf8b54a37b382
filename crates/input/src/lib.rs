//! Input Tracker: raw key events folded into a single pending direction.
//!
//! # Invariants
//! - The last movement key pressed wins.
//! - Releasing a key only clears the pending direction if that key set it.

pub mod tracker;

pub use tracker::{InputEvent, InputTracker};

pub fn crate_info() -> &'static str {
    "rollcube-input v0.1.0"
}
