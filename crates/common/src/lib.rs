//! Shared types and configuration for the rolling cube.
//!
//! # Invariants
//! - A cube always rests on integer grid coordinates between turns.
//! - Every moving direction steps exactly one cell along exactly one axis.

pub mod config;
pub mod types;

pub use config::{ConfigError, CubeConfig, KeyBindings, Settings};
pub use types::{Direction, GridPos, Transform};
