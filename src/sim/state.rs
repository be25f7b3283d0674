//! Pin entities, the bounded pin registry and the per-attempt arena
//!
//! Slot indices are stable for the whole attempt and are what events refer to.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::level::{LevelConfig, level_config};
use crate::consts::LAUNCH_ANGLE;
use crate::normalize_degrees;
use crate::tuning::Tuning;

/// A fired projectile or ring member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Degrees in [0, 360); meaningful once attached
    pub angle: f32,
    /// Distance left to the attach radius (0 once attached)
    pub radial_offset: f32,
    /// Reached the ring and rotates with it
    pub attached: bool,
    /// Involved in a collision this attempt (sticky)
    pub collided: bool,
}

impl Pin {
    /// A freshly fired pin at the launch point
    pub fn launched(launch_distance: f32) -> Self {
        Self {
            angle: LAUNCH_ANGLE,
            radial_offset: launch_distance,
            attached: false,
            collided: false,
        }
    }

    /// A pre-attached obstacle pin
    pub fn obstacle(angle: f32) -> Self {
        Self {
            angle: normalize_degrees(angle),
            radial_offset: 0.0,
            attached: true,
            collided: false,
        }
    }

    /// Rotate with the ring by `degrees`
    pub fn rotate(&mut self, degrees: f32) {
        self.angle = normalize_degrees(self.angle + degrees);
    }

    /// Move inward by `distance`; returns true on the tick the pin attaches
    pub fn approach(&mut self, distance: f32) -> bool {
        self.radial_offset -= distance;
        if self.radial_offset <= 0.0 {
            self.radial_offset = 0.0;
            self.attached = true;
            return true;
        }
        false
    }
}

/// Fixed-capacity ordered pin storage plus the count of pins in play
///
/// Storage may hold slots past `count` (the extra seeded obstacle); those are
/// never simulated and are overwritten by the next spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRegistry {
    slots: Vec<Pin>,
    count: usize,
    capacity: usize,
}

impl PinRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            count: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pins currently in play
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    /// Pins in play, in slot order
    pub fn in_play(&self) -> &[Pin] {
        &self.slots[..self.count]
    }

    pub fn in_play_mut(&mut self) -> &mut [Pin] {
        &mut self.slots[..self.count]
    }

    /// Every stored slot, including any seeded past `count`
    pub fn slots(&self) -> &[Pin] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Pin> {
        self.in_play().get(index)
    }

    /// All pins in play have reached the ring
    pub fn all_attached(&self) -> bool {
        self.in_play().iter().all(|p| p.attached)
    }

    /// Drop every pin
    pub fn clear(&mut self) {
        self.slots.clear();
        self.count = 0;
    }

    /// Seed obstacle pins for a level into the lowest slots
    pub fn seed_obstacles(&mut self, level: &LevelConfig) {
        self.clear();
        let seeded = level.obstacle_angles.len().min(self.capacity);
        debug_assert!(
            seeded == level.obstacle_angles.len(),
            "obstacle seeding exceeds registry capacity"
        );
        if seeded < level.obstacle_angles.len() {
            log::warn!(
                "Level {} seeds {} obstacles but capacity is {}; clamping",
                level.level,
                level.obstacle_angles.len(),
                self.capacity
            );
        }
        self.slots.extend(
            level.obstacle_angles[..seeded]
                .iter()
                .map(|&angle| Pin::obstacle(angle)),
        );
        self.count = level.obstacle_pin_count.min(self.capacity);
    }

    /// Append a pin at slot `count`; returns its index, or None when full
    pub fn spawn(&mut self, pin: Pin) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = self.count;
        if index < self.slots.len() {
            self.slots[index] = pin;
        } else {
            self.slots.push(pin);
        }
        self.count += 1;
        Some(index)
    }
}

/// Events produced by the simulation and scene flow (consumed by audio)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A pin was fired into slot `index`
    PinFired { index: usize },
    /// Pin `index` reached the ring
    PinAttached { index: usize },
    /// Pins `first` and `second` are too close (first > second)
    PinsCollided { first: usize, second: usize },
    /// Fail delay elapsed
    Failed,
    /// All target pins attached without collision
    LevelComplete { level: u32 },
    /// A UI navigation changed the scene
    Navigated,
    /// Background music switched on or off from the settings menu
    MusicToggled,
}

/// Everything one attempt at a level needs: pins, timers, difficulty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub pins: PinRegistry,
    pub clock: SimClock,
    pub level: LevelConfig,
    pub tuning: Tuning,
    /// Colliding pairs `(i, j)`, `j < i`, already reported this attempt
    #[serde(default)]
    pub reported_collisions: BTreeSet<(usize, usize)>,
}

impl Arena {
    /// Empty arena for level 1 (obstacles not yet seeded)
    pub fn new(tuning: Tuning) -> Self {
        Self {
            pins: PinRegistry::new(tuning.capacity),
            clock: SimClock::new(),
            level: level_config(1),
            tuning,
            reported_collisions: BTreeSet::new(),
        }
    }

    /// Drop all pins and clear the fail state
    pub fn reset(&mut self) {
        self.pins.clear();
        self.clock.reset_fail();
        self.reported_collisions.clear();
    }

    /// Reset and set up `level` with its obstacle pins
    pub fn start_level(&mut self, level: u32) {
        self.reset();
        self.level = level_config(level);
        self.pins.seed_obstacles(&self.level);
        if self.level.target_pin_count > self.pins.capacity() {
            log::warn!(
                "Level {} targets {} pins but capacity is {}",
                self.level.level,
                self.level.target_pin_count,
                self.pins.capacity()
            );
        }
        log::info!(
            "Level {} ready: target {} pins, {} obstacles",
            self.level.level,
            self.level.target_pin_count,
            self.level.obstacle_pin_count
        );
    }

    /// Pins the player can still fire this attempt
    pub fn remaining(&self) -> usize {
        self.level.target_pin_count.saturating_sub(self.pins.count())
    }
}
