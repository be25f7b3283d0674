//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (travel and rotation are per-tick constants)
//! - No randomness; levels are a pure function of the level number
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use clock::{FixedStep, SimClock, rotation_speed_at};
pub use collision::{angular_gap, pins_collide, separation};
pub use level::{LevelConfig, level_config};
pub use state::{Arena, GameEvent, Pin, PinRegistry};
pub use tick::{TickInput, TickOutcome, tick};
