//! Rendering Adapter: renderer-agnostic interface.
//!
//! Renderers read the cube's state and a view; they never drive the engine.
//! The floor is static scenery derived from the cube configuration.

mod floor;
mod renderer;

pub use floor::FloorGrid;
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "rollcube-render v0.1.0"
}
