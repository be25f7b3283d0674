//! Level generation
//!
//! Maps a level number to its difficulty: how many pins must be on the ring
//! to win and how many obstacle pins are pre-attached at the start.

use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// Difficulty for one level (pure function of the level number)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level number after clamping (>= 1)
    pub level: u32,
    /// Pins on the ring (obstacles included) needed to complete the level
    pub target_pin_count: usize,
    /// Obstacle pins counted as in play at level start
    pub obstacle_pin_count: usize,
    /// Starting angles of the seeded obstacle pins.
    ///
    /// Holds `obstacle_pin_count + 1` entries when there are obstacles: the
    /// seeding loop runs one slot past the count, and that last slot sits
    /// outside `count` until the first fired pin overwrites it.
    pub obstacle_angles: Vec<f32>,
}

/// Obstacle tier for a level: (obstacle count, target override)
///
/// Levels past the last tier have no obstacles and use the base target.
fn obstacle_tier(level: u32) -> Option<(usize, u32)> {
    match level {
        0..=1 => None,
        2..=3 => Some((1, 3 + level + 1)),
        4..=6 => Some((2, level + 5)),
        7..=11 => Some((3, level + 5)),
        12..=17 => Some((4, level)),
        18..=24 => Some((5, level)),
        25..=31 => Some((6, level - 2)),
        _ => None,
    }
}

/// Build the difficulty configuration for `level` (values below 1 clamp to 1)
pub fn level_config(level: impl Into<i64>) -> LevelConfig {
    let level = level.into().clamp(1, u32::MAX as i64) as u32;

    let base_target = if level < 9 {
        3 + (level - 1).saturating_mul(2)
    } else {
        (level - 2).saturating_mul(2)
    };

    let (obstacle_pin_count, target) = match obstacle_tier(level) {
        Some((count, target)) => (count, target),
        None => (0, base_target),
    };

    // Guard the spacing formula: no obstacles means no angles at all
    let obstacle_angles = if obstacle_pin_count == 0 {
        Vec::new()
    } else {
        let spacing = 360.0 / obstacle_pin_count as f32;
        (0..=obstacle_pin_count)
            .map(|i| normalize_degrees(i as f32 * spacing))
            .collect()
    };

    LevelConfig {
        level,
        target_pin_count: target as usize,
        obstacle_pin_count,
        obstacle_angles,
    }
}
