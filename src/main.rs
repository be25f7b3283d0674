//! Pinwheel headless runner
//!
//! Drives the scene controller through a fixed-step loop with the autopilot
//! firing pins, the way the real game loop drives it with player input.
//!
//! Usage: `pinwheel [--tuning tuning.json] [--levels N] [--json]`

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use pinwheel::audio::{AudioManager, NullSink};
    use pinwheel::consts::SIM_DT;
    use pinwheel::sim::{FixedStep, TickInput, autopilot};
    use pinwheel::{ConfigError, Flow, Scene, SceneController, Settings, Tuning, UiEvent};

    /// Give up after this many simulated frames (10 minutes at 60 Hz)
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    /// Failed attempts on one level before quitting
    const MAX_RETRIES: u32 = 3;

    struct Options {
        tuning_path: Option<String>,
        levels: u32,
        json: bool,
    }

    fn parse_args() -> Options {
        let mut options = Options {
            tuning_path: None,
            levels: 5,
            json: false,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--tuning" => options.tuning_path = args.next(),
                "--levels" => match args.next().and_then(|n| n.parse().ok()) {
                    Some(levels) => options.levels = levels,
                    None => log::warn!("--levels expects a number; using {}", options.levels),
                },
                "--json" => options.json = true,
                other => log::warn!("Ignoring unknown argument {:?}", other),
            }
        }
        options
    }

    pub fn run() -> Result<(), ConfigError> {
        env_logger::init();
        let options = parse_args();

        let tuning = match &options.tuning_path {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        log::info!("Pinwheel (headless) starting, playing {} levels", options.levels);

        let mut controller = SceneController::new(tuning);
        let mut audio = AudioManager::new(NullSink, Settings::default());
        let mut step = FixedStep::new();

        controller.handle_ui(UiEvent::Start);

        let mut cleared = 0;
        let mut retries = 0;
        let mut frames = 0u64;
        while cleared < options.levels && frames < MAX_FRAMES {
            frames += 1;

            // Simulated 60 Hz display refresh
            for _ in 0..step.push(SIM_DT) {
                let input = TickInput {
                    fire: autopilot::should_fire(&controller.state().arena, SIM_DT),
                };
                controller.update(&input, SIM_DT);
            }
            audio.handle(&controller.drain_events());

            match controller.scene() {
                Scene::LevelComplete => {
                    cleared += 1;
                    retries = 0;
                    controller.handle_ui(UiEvent::NextLevel);
                }
                Scene::Fail => {
                    retries += 1;
                    let event = if retries > MAX_RETRIES {
                        UiEvent::Exit
                    } else {
                        UiEvent::Retry
                    };
                    if controller.handle_ui(event) == Flow::Exit {
                        break;
                    }
                }
                _ => {}
            }
        }

        let state = controller.state();
        log::info!(
            "Cleared {} levels in {} frames; highest level reached {}",
            cleared,
            frames,
            state.highest_level_reached
        );
        if options.json {
            println!("{}", controller.snapshot().to_json()?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), pinwheel::ConfigError> {
    runner::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds embed the library directly; there is no headless runner
}
