//! Rotation Engine: the cube's grid position, quarter-turn state machine and
//! the continuous rolling transform derived from it.
//!
//! # Invariants
//! - At rest the active direction is `None` and the accumulated angle is zero.
//! - The grid position only changes when a quarter turn completes, by exactly
//!   one cell along one axis.
//! - The transform is a pure function of engine state and configuration.

pub mod engine;
pub mod transform;

pub use engine::{Phase, RollEvent, RollingCube};
pub use transform::{QUARTER_TURN, ease_in, roll_transform};
