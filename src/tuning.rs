//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through `Tuning`, so a
//! JSON file can rebalance the game without a rebuild. Missing fields fall
//! back to the values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Registry capacity (hard bound on pins per attempt)
    pub capacity: usize,
    /// Minimum angular separation between attached pins (degrees)
    pub collision_threshold: f32,
    /// Inward travel per tick of a fired pin
    pub pin_speed: f32,
    /// Distance a fired pin travels before it attaches
    pub launch_distance: f32,
    /// Seconds between the first collision and the fail scene
    pub fail_delay: f32,
    /// Length of one rotation-speed cycle (seconds)
    pub rotation_period: f32,
    /// Fast part at the start of each cycle (seconds)
    pub fast_window: f32,
    /// Degrees per tick during the fast window
    pub fast_speed: f32,
    /// Degrees per tick for the rest of the cycle
    pub slow_speed: f32,
    /// Highest playable level (`None` = unbounded)
    pub max_level: Option<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            capacity: PIN_CAPACITY,
            collision_threshold: COLLISION_THRESHOLD,
            pin_speed: PIN_SPEED,
            launch_distance: LAUNCH_DISTANCE,
            fail_delay: FAIL_DELAY,
            rotation_period: ROTATION_PERIOD,
            fast_window: FAST_WINDOW,
            fast_speed: FAST_SPEED,
            slow_speed: SLOW_SPEED,
            max_level: None,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if !(self.collision_threshold > 0.0 && self.collision_threshold < 180.0) {
            return Err(ConfigError::InvalidThreshold(self.collision_threshold));
        }
        let positive = [
            ("pin_speed", self.pin_speed),
            ("launch_distance", self.launch_distance),
            ("fail_delay", self.fail_delay),
            ("rotation_period", self.rotation_period),
            ("fast_speed", self.fast_speed),
            ("slow_speed", self.slow_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        // A zero-length fast window is allowed (constant slow rotation)
        if self.fast_window < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "fast_window",
                value: self.fast_window,
            });
        }
        if self.max_level == Some(0) {
            return Err(ConfigError::LevelCap);
        }
        Ok(())
    }

    /// Number of ticks a fired pin needs to reach the ring (spawn tick included)
    pub fn travel_ticks(&self) -> u32 {
        (self.launch_distance / self.pin_speed).ceil().max(1.0) as u32
    }

    /// Apply the optional level cap
    pub fn cap_level(&self, level: u32) -> u32 {
        match self.max_level {
            Some(max) => level.min(max),
            None => level,
        }
    }
}
