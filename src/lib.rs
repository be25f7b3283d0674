//! Pinwheel - gameplay core for a rotating-hub pin shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pin lifecycle, rotation, collisions, levels)
//! - `scene`: Scene state machine (menu, game, fail, level complete, level select)
//! - `ui`: Navigation events and the level-select number entry
//! - `snapshot`: Read-only view handed to the renderer each tick
//! - `audio`: Routing of gameplay events to an external sound sink
//! - `tuning`: Data-driven game balance
//! - `settings`: Player audio preferences

pub mod audio;
pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;
pub mod ui;

pub use error::ConfigError;
pub use scene::{Flow, GameState, Scene, SceneController};
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use tuning::Tuning;
pub use ui::UiEvent;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the fixed-step accumulator accepts (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Attach radius: distance from hub center to an attached pin
    pub const PIN_DISTANCE: f32 = 60.0;

    /// Default registry capacity (independent of any level's target)
    pub const PIN_CAPACITY: usize = 250;
    /// Inward travel per tick of an unattached pin
    pub const PIN_SPEED: f32 = 6.0;
    /// Spawn point minus attach radius
    pub const LAUNCH_DISTANCE: f32 = 300.0;
    /// Angle at which fired pins arrive on the ring (degrees)
    pub const LAUNCH_ANGLE: f32 = 90.0;
    /// Minimum angular separation of attached pins (degrees)
    pub const COLLISION_THRESHOLD: f32 = 9.0;
    /// Delay between the first collision and the fail scene (seconds)
    pub const FAIL_DELAY: f32 = 1.0;

    /// Rotation speed oscillation: `FAST_SPEED` for the first `FAST_WINDOW`
    /// seconds of every `ROTATION_PERIOD`, `SLOW_SPEED` otherwise (degrees/tick)
    pub const ROTATION_PERIOD: f32 = 3.0;
    pub const FAST_WINDOW: f32 = 1.0;
    pub const FAST_SPEED: f32 = 2.0;
    pub const SLOW_SPEED: f32 = 1.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert polar (r, theta radians) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
