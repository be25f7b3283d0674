use proptest::prelude::*;

use pinwheel::consts::SIM_DT;
use pinwheel::sim::{Arena, TickInput, autopilot, level_config, pins_collide, tick};
use pinwheel::{SceneController, Tuning, UiEvent};

/// One driver action against the scene controller
#[derive(Debug, Clone)]
enum Action {
    Ui(UiEvent),
    Tick { fire: bool, dt: f32 },
    Autoplay(usize),
}

fn ui_event() -> impl Strategy<Value = UiEvent> {
    prop_oneof![
        Just(UiEvent::Start),
        Just(UiEvent::OpenSettings),
        Just(UiEvent::OpenLevelSelect),
        Just(UiEvent::Back),
        (0u32..20).prop_map(UiEvent::PickLevel),
        (0u8..12).prop_map(UiEvent::Digit),
        Just(UiEvent::ClearEntry),
        Just(UiEvent::SubmitEntry),
        Just(UiEvent::ToggleMusic),
        Just(UiEvent::NextLevel),
        Just(UiEvent::Retry),
        Just(UiEvent::ToMenu),
        Just(UiEvent::Exit),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => ui_event().prop_map(Action::Ui),
        2 => (any::<bool>(), 0.001f32..0.2).prop_map(|(fire, dt)| Action::Tick { fire, dt }),
        1 => (1usize..300).prop_map(Action::Autoplay),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn angles_stay_normalized_and_count_bounded(
        level in 1u32..30,
        steps in prop::collection::vec((any::<bool>(), 0.001f32..0.2), 1..400),
    ) {
        let mut arena = Arena::new(Tuning::default());
        arena.start_level(level);
        let target = arena.level.target_pin_count;
        let mut collided = vec![false; arena.pins.capacity()];

        for (fire, dt) in steps {
            tick(&mut arena, &TickInput { fire }, dt);

            prop_assert!(arena.pins.count() <= target);
            prop_assert!(arena.pins.count() <= arena.pins.capacity());
            for (i, pin) in arena.pins.in_play().iter().enumerate() {
                prop_assert!((0.0..360.0).contains(&pin.angle), "angle {}", pin.angle);
                // Collided is sticky
                prop_assert!(!collided[i] || pin.collided);
                collided[i] = pin.collided;
            }
        }
    }

    #[test]
    fn collision_is_symmetric(
        a in 0.0f32..360.0,
        b in 0.0f32..360.0,
        threshold in 0.5f32..179.0,
    ) {
        prop_assert_eq!(pins_collide(a, b, threshold), pins_collide(b, a, threshold));
    }

    #[test]
    fn level_config_is_pure(level in -1000i64..1000) {
        let first = level_config(level);
        prop_assert_eq!(&first, &level_config(level));
        if level < 1 {
            prop_assert_eq!(&first, &level_config(1));
        }
        let k = first.obstacle_pin_count;
        prop_assert_eq!(first.obstacle_angles.len(), if k == 0 { 0 } else { k + 1 });
        for angle in &first.obstacle_angles {
            prop_assert!((0.0..360.0).contains(angle));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn unlock_is_monotone(
        start in 1u32..6,
        actions in prop::collection::vec(action(), 1..30),
    ) {
        let mut c = SceneController::unlocked(Tuning::default(), start);

        for action in actions {
            let highest = c.state().highest_level_reached;
            let level = c.state().current_level;
            let mut completed = false;

            match action {
                Action::Ui(event) => {
                    c.handle_ui(event);
                }
                Action::Tick { fire, dt } => {
                    if let Some(outcome) = c.update(&TickInput { fire }, dt) {
                        completed = outcome.level_complete && !outcome.fail_triggered;
                    }
                }
                Action::Autoplay(ticks) => {
                    for _ in 0..ticks {
                        let fire = autopilot::should_fire(&c.state().arena, SIM_DT);
                        match c.update(&TickInput { fire }, SIM_DT) {
                            Some(outcome) => {
                                if outcome.level_complete && !outcome.fail_triggered {
                                    completed = true;
                                }
                            }
                            None => break,
                        }
                    }
                }
            }

            let now = c.state().highest_level_reached;
            prop_assert!(now >= highest);
            if now != highest {
                prop_assert_eq!(now, highest + 1);
                prop_assert!(completed);
                prop_assert_eq!(level, highest);
            }
        }
    }
}
