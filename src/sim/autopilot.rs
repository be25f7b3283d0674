//! Idle/demo mode player
//!
//! Fires only when the landing spot will be clear by the time the pin reaches
//! the ring. The ring's rotation over the pin's travel time is predicted by
//! replaying the rotation timer, so the prediction is exact for a fixed `dt`.

use super::clock::rotation_speed_at;
use super::collision::separation;
use super::state::Arena;
use crate::consts::LAUNCH_ANGLE;
use crate::normalize_degrees;

/// Degrees the ring turns between firing now and the new pin attaching
pub fn predicted_rotation(arena: &Arena, dt: f32) -> f32 {
    let tuning = &arena.tuning;
    let mut timer = arena.clock.rotation_timer();
    let mut total = 0.0;
    for _ in 0..tuning.travel_ticks() {
        timer += dt;
        total += rotation_speed_at(timer, tuning);
    }
    total
}

/// Whether firing this tick lands the pin safely
pub fn should_fire(arena: &Arena, dt: f32) -> bool {
    let pins = arena.pins.in_play();
    if arena.pins.count() >= arena.level.target_pin_count || arena.pins.is_full() {
        return false;
    }
    if arena.clock.fail_pending() || pins.iter().any(|p| !p.attached) {
        return false;
    }

    let rotation = predicted_rotation(arena, dt);
    // Extra margin of one fast tick absorbs dt jitter
    let clearance = arena.tuning.collision_threshold + arena.tuning.fast_speed;
    pins.iter()
        .all(|p| separation(normalize_degrees(p.angle + rotation), LAUNCH_ANGLE) >= clearance)
}
