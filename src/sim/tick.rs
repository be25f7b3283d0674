//! Fixed timestep simulation tick
//!
//! Advances one attempt by exactly one tick: spawn, rotation speed, pin
//! movement, collision detection, completion and the fail delay, in that order.

use std::collections::BTreeSet;

use super::collision::pins_collide;
use super::state::{Arena, GameEvent, Pin};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Fire a pin (edge-triggered: one shot per press)
    pub fire: bool,
}

impl TickInput {
    pub fn fire() -> Self {
        Self { fire: true }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Slot of the pin fired this tick
    pub fired: Option<usize>,
    /// Slots that reached the ring this tick
    pub attached: BTreeSet<usize>,
    /// Slots involved in any collision this tick
    pub collided: BTreeSet<usize>,
    /// Colliding pairs `(i, j)` with `j < i`
    pub collisions: Vec<(usize, usize)>,
    /// Target reached, everything attached, no collision
    pub level_complete: bool,
    /// The fail delay elapsed this tick
    pub fail_triggered: bool,
    /// Events for the audio layer, in occurrence order
    pub events: Vec<GameEvent>,
}

/// Advance the arena by one fixed timestep
///
/// Travel and rotation are per-tick constants; `dt` only feeds the rotation
/// and fail timers.
pub fn tick(arena: &mut Arena, input: &TickInput, dt: f32) -> TickOutcome {
    let tuning = arena.tuning;
    let target = arena.level.target_pin_count;
    let mut outcome = TickOutcome::default();

    // Spawn
    if input.fire {
        if arena.pins.count() < target {
            debug_assert!(
                !arena.pins.is_full(),
                "pin capacity {} reached below level target {}",
                arena.pins.capacity(),
                target
            );
            match arena.pins.spawn(Pin::launched(tuning.launch_distance)) {
                Some(index) => {
                    outcome.fired = Some(index);
                    outcome.events.push(GameEvent::PinFired { index });
                }
                None => log::warn!(
                    "Pin capacity {} reached below level target {}; fire ignored",
                    arena.pins.capacity(),
                    target
                ),
            }
        } else {
            log::debug!("Fire ignored: all {} pins already fired", target);
        }
    }

    // Rotation speed oscillation
    let speed = arena.clock.advance_rotation(dt, &tuning);

    // Move or rotate every pin in play
    for (index, pin) in arena.pins.in_play_mut().iter_mut().enumerate() {
        if pin.attached {
            pin.rotate(speed);
        } else if pin.approach(tuning.pin_speed) {
            log::debug!("Pin {} attached at {:.1}°", index, pin.angle);
            outcome.attached.insert(index);
            outcome.events.push(GameEvent::PinAttached { index });
        }
    }

    // All-pairs angular collision check among attached pins
    let pins = arena.pins.in_play();
    for (i, a) in pins.iter().enumerate().filter(|(_, p)| p.attached) {
        for (j, b) in pins[..i].iter().enumerate().filter(|(_, p)| p.attached) {
            if pins_collide(a.angle, b.angle, tuning.collision_threshold) {
                outcome.collisions.push((i, j));
            }
        }
    }

    let pins = arena.pins.in_play_mut();
    for &(i, j) in &outcome.collisions {
        // Each pair is reported once per attempt
        if arena.reported_collisions.insert((i, j)) {
            log::debug!(
                "Pins {} and {} collided ({:.1}° / {:.1}°)",
                i,
                j,
                pins[i].angle,
                pins[j].angle
            );
            outcome.events.push(GameEvent::PinsCollided { first: i, second: j });
        }
        pins[i].collided = true;
        pins[j].collided = true;
        outcome.collided.insert(i);
        outcome.collided.insert(j);
    }

    if !outcome.collisions.is_empty() && arena.clock.arm_fail() {
        log::info!(
            "Collision on level {}; failing in {:.1}s",
            arena.level.level,
            tuning.fail_delay
        );
    }

    // Completion
    outcome.level_complete = arena.pins.count() == target
        && arena.pins.all_attached()
        && outcome.collisions.is_empty()
        && !arena.clock.fail_pending();
    if outcome.level_complete {
        outcome.events.push(GameEvent::LevelComplete {
            level: arena.level.level,
        });
    }

    // Fail delay
    if arena.clock.advance_fail(dt, &tuning) {
        outcome.fail_triggered = true;
        outcome.events.push(GameEvent::Failed);
    }

    outcome
}
