//! wgpu render backend for the rolling cube.
//!
//! Draws the static floor grid and one shaded cube from the engine's transform.
//! The camera never moves; the scene keeps a 3:2 aspect and is letterboxed
//! inside the window.

mod camera;
mod gpu;
mod shaders;

pub use camera::{FixedCamera, Viewport};
pub use gpu::{CUBE_COLOR, WgpuRenderer};
