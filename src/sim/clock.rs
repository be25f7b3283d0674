//! Simulation timers and the fixed-step accumulator
//!
//! Pin travel and ring rotation are per-tick constants; only the timers below
//! see real elapsed time. `FixedStep` converts frame time into whole ticks.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};
use crate::tuning::Tuning;

/// Per-attempt timers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Seconds accumulated since the clock was created (never reset)
    rotation_timer: f32,
    /// Seconds since the first collision of this attempt
    fail_timer: f32,
    /// A collision happened and the fail scene is still delayed
    fail_pending: bool,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation_timer(&self) -> f32 {
        self.rotation_timer
    }

    pub fn fail_timer(&self) -> f32 {
        self.fail_timer
    }

    pub fn fail_pending(&self) -> bool {
        self.fail_pending
    }

    /// Rotation speed (degrees/tick) derived from the rotation timer
    pub fn rotation_speed(&self, tuning: &Tuning) -> f32 {
        rotation_speed_at(self.rotation_timer, tuning)
    }

    /// Advance the rotation timer and return the speed for this tick
    pub fn advance_rotation(&mut self, dt: f32, tuning: &Tuning) -> f32 {
        self.rotation_timer += dt;
        self.rotation_speed(tuning)
    }

    /// Start the fail delay unless one is already running
    ///
    /// Returns true if this call started it.
    pub fn arm_fail(&mut self) -> bool {
        if self.fail_pending {
            return false;
        }
        self.fail_pending = true;
        self.fail_timer = 0.0;
        true
    }

    /// Accumulate the fail delay; returns true exactly once when it elapses
    pub fn advance_fail(&mut self, dt: f32, tuning: &Tuning) -> bool {
        if !self.fail_pending {
            return false;
        }
        self.fail_timer += dt;
        if self.fail_timer >= tuning.fail_delay {
            self.fail_pending = false;
            return true;
        }
        false
    }

    /// Clear the fail state for a fresh attempt (rotation timer keeps running)
    pub fn reset_fail(&mut self) {
        self.fail_pending = false;
        self.fail_timer = 0.0;
    }
}

/// Rotation speed for a given timer value
pub fn rotation_speed_at(timer: f32, tuning: &Tuning) -> f32 {
    if timer.rem_euclid(tuning.rotation_period) < tuning.fast_window {
        tuning.fast_speed
    } else {
        tuning.slow_speed
    }
}

/// Fixed timestep accumulator
///
/// Feed it wall-clock frame time, get back how many `SIM_DT` ticks to run.
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's elapsed time and return the ticks due
    pub fn push(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}
