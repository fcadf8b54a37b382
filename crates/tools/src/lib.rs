//! Developer tooling: read-only inspection of the rolling cube.

mod inspector;

pub use inspector::{CubeInspector, CubeSummary};

pub fn crate_info() -> &'static str {
    "rollcube-tools v0.1.0"
}
