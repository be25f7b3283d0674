//! Read-only frame snapshot for the renderer
//!
//! Positions are relative to the hub center in screen orientation (+y down):
//! attached pins sit on the attach radius at their angle, pins in flight sit
//! straight below the hub.

use glam::Vec2;
use serde::Serialize;

use crate::consts::PIN_DISTANCE;
use crate::polar_to_cartesian;
use crate::scene::{GameState, Scene};
use crate::sim::Pin;

/// One pin as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PinView {
    pub index: usize,
    pub angle: f32,
    pub radial_offset: f32,
    pub attached: bool,
    pub collided: bool,
    /// Hub-relative position
    pub position: Vec2,
}

impl PinView {
    fn from_pin(index: usize, pin: &Pin) -> Self {
        let position = if pin.attached {
            polar_to_cartesian(PIN_DISTANCE, pin.angle.to_radians())
        } else {
            Vec2::new(0.0, PIN_DISTANCE + pin.radial_offset)
        };
        Self {
            index,
            angle: pin.angle,
            radial_offset: pin.radial_offset,
            attached: pin.attached,
            collided: pin.collided,
            position,
        }
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub scene: Scene,
    pub current_level: u32,
    pub highest_level_reached: u32,
    /// Pins left to fire this attempt
    pub remaining_pins: usize,
    /// Level-select entry text
    pub level_entry: String,
    pub pins: Vec<PinView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        // Pins are only meaningful while an attempt is built
        let (pins, remaining_pins) = if state.level_initialized {
            let pins: Vec<PinView> = state
                .arena
                .pins
                .in_play()
                .iter()
                .enumerate()
                .map(|(i, pin)| PinView::from_pin(i, pin))
                .collect();
            (pins, state.arena.remaining())
        } else {
            (Vec::new(), 0)
        };

        Self {
            scene: state.scene,
            current_level: state.current_level,
            highest_level_reached: state.highest_level_reached,
            remaining_pins,
            level_entry: state.level_entry.as_str().to_owned(),
            pins,
        }
    }

    /// Serialize for logging/debugging
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
