//! Otto Core - Foundational types for the Otto cycle simulator
//!
//! This crate provides the types every other Otto crate depends on:
//! - `Phase` - The four strokes and the angle-to-phase mapping
//! - `CrankState` - Crank angle, cached phase, run flag and speed
//! - `EngineLayout`, `EngineGeometry` - Slider-crank kinematics
//! - `SimConfig` - TOML configuration
//! - `Point`, `Rect`, `Color` - Drawing types
//! - Error types and Result alias

pub mod config;
mod error;
mod geometry;
mod phase;
mod state;
mod types;

pub use config::{ClockConfig, SimConfig, DEFAULT_CONFIG_FILE};
pub use error::{OttoError, Result};
pub use geometry::{EngineGeometry, EngineLayout};
pub use phase::{normalize_angle, Phase, CYCLE_DEGREES, STROKE_DEGREES};
pub use state::{CrankState, MAX_SPEED, MIN_SPEED};
pub use types::{Color, Point, Rect};
