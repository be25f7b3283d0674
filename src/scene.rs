//! Scene state machine
//!
//! `SceneController` owns the `GameState` exclusively. Each frame the driver
//! hands it UI navigation events (`handle_ui`) and then one simulation step
//! (`update`); the renderer reads the result through `state()` or `snapshot()`.

use serde::{Deserialize, Serialize};

use crate::sim::{Arena, GameEvent, TickInput, TickOutcome, tick};
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;
use crate::ui::{LevelEntry, UiEvent};

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scene {
    #[default]
    MainMenu,
    Game,
    Fail,
    LevelComplete,
    SettingsMenu,
    /// Jump to any completed level or the next one
    LevelSelect,
}

/// Whether the driver should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything the game tracks between frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub current_level: u32,
    /// Starts at 1, never decreases
    pub highest_level_reached: u32,
    pub scene: Scene,
    pub arena: Arena,
    /// Registry and level config are built for `current_level`
    pub level_initialized: bool,
    pub level_entry: LevelEntry,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            current_level: 1,
            highest_level_reached: 1,
            scene: Scene::MainMenu,
            arena: Arena::new(tuning),
            level_initialized: false,
            level_entry: LevelEntry::new(),
        }
    }

    fn tuning(&self) -> Tuning {
        self.arena.tuning
    }

    /// Switch to the game scene on `level`, rebuilding the attempt
    fn begin_level(&mut self, level: u32) {
        self.current_level = level;
        self.level_initialized = false;
        self.scene = Scene::Game;
        self.ensure_level_initialized();
    }

    /// Build registry and level config if the game scene needs them
    fn ensure_level_initialized(&mut self) {
        if self.scene == Scene::Game && !self.level_initialized {
            self.arena.start_level(self.current_level);
            self.level_initialized = true;
        }
    }

    /// Discard the attempt and return to the main menu
    fn leave_to_menu(&mut self) {
        self.arena.reset();
        self.level_initialized = false;
        self.scene = Scene::MainMenu;
    }

    /// Unlock the next level when finishing the frontier level
    fn record_completion(&mut self) {
        if self.current_level >= self.highest_level_reached {
            let next = self.tuning().cap_level(self.current_level.saturating_add(1));
            if next > self.highest_level_reached {
                self.highest_level_reached = next;
                log::info!("Unlocked level {}", next);
            }
        }
    }

    fn pick_level(&mut self, level: u32) {
        if (1..=self.highest_level_reached).contains(&level) {
            self.level_entry.clear();
            self.begin_level(level);
        } else {
            log::debug!(
                "Level {} is locked (highest reached {})",
                level,
                self.highest_level_reached
            );
        }
    }
}

/// Top-level finite state machine
#[derive(Debug, Clone)]
pub struct SceneController {
    state: GameState,
    events: Vec<GameEvent>,
}

impl SceneController {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            events: Vec::new(),
        }
    }

    /// Start with levels up to `highest_level` already unlocked
    pub fn unlocked(tuning: Tuning, highest_level: u32) -> Self {
        let mut controller = Self::new(tuning);
        controller.state.highest_level_reached = tuning.cap_level(highest_level.max(1));
        controller
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scene(&self) -> Scene {
        self.state.scene
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Events produced since the last drain (for the audio layer)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one navigation event
    pub fn handle_ui(&mut self, event: UiEvent) -> Flow {
        let before = self.state.scene;
        let state = &mut self.state;

        match (before, event) {
            (Scene::MainMenu, UiEvent::Start) => {
                let level = state.highest_level_reached;
                state.begin_level(level);
            }
            (Scene::MainMenu, UiEvent::OpenSettings) => state.scene = Scene::SettingsMenu,

            (Scene::SettingsMenu, UiEvent::Back) => state.scene = Scene::MainMenu,
            (Scene::SettingsMenu, UiEvent::OpenLevelSelect) => {
                state.level_entry.clear();
                state.scene = Scene::LevelSelect;
            }
            (Scene::SettingsMenu, UiEvent::ToggleMusic) => {
                self.events.push(GameEvent::MusicToggled);
            }

            (Scene::LevelSelect, UiEvent::Back) => {
                state.level_entry.clear();
                state.scene = Scene::SettingsMenu;
            }
            (Scene::LevelSelect, UiEvent::PickLevel(level)) => state.pick_level(level),
            (Scene::LevelSelect, UiEvent::Digit(digit)) => {
                if !state.level_entry.push_digit(digit) {
                    log::debug!("Level entry rejected digit {}", digit);
                }
            }
            (Scene::LevelSelect, UiEvent::ClearEntry) => state.level_entry.clear(),
            (Scene::LevelSelect, UiEvent::SubmitEntry) => match state.level_entry.take() {
                Some(level) => state.pick_level(level),
                None => log::debug!("Level entry is empty"),
            },

            (Scene::LevelComplete, UiEvent::NextLevel) => {
                let next = state.tuning().cap_level(state.current_level.saturating_add(1));
                state.begin_level(next);
            }
            (Scene::LevelComplete, UiEvent::ToMenu) => state.leave_to_menu(),

            (Scene::Fail, UiEvent::Retry) => {
                state.arena.reset();
                let level = state.current_level;
                state.begin_level(level);
            }
            (Scene::Fail, UiEvent::ToMenu) => state.leave_to_menu(),
            (Scene::Fail, UiEvent::Exit) => {
                log::info!("Exit requested");
                return Flow::Exit;
            }

            (scene, event) => log::debug!("Ignoring {:?} in {:?}", event, scene),
        }

        if self.state.scene != before {
            log::info!("Scene {:?} -> {:?}", before, self.state.scene);
            self.events.push(GameEvent::Navigated);
        }
        Flow::Continue
    }

    /// Run one simulation step if the game scene is active
    pub fn update(&mut self, input: &TickInput, dt: f32) -> Option<TickOutcome> {
        if self.state.scene != Scene::Game {
            return None;
        }
        self.state.ensure_level_initialized();

        let outcome = tick(&mut self.state.arena, input, dt);
        self.events.extend(outcome.events.iter().copied());

        if outcome.fail_triggered {
            log::info!("Level {} failed", self.state.current_level);
            self.state.scene = Scene::Fail;
        } else if outcome.level_complete {
            log::info!("Level {} complete", self.state.current_level);
            self.state.scene = Scene::LevelComplete;
            self.state.record_completion();
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SceneController {
        SceneController::new(Tuning::default())
    }

    #[test]
    fn starts_in_main_menu() {
        let c = controller();
        assert_eq!(c.scene(), Scene::MainMenu);
        assert_eq!(c.state().highest_level_reached, 1);
        assert!(!c.state().level_initialized);
    }

    #[test]
    fn start_initializes_highest_level() {
        let mut c = SceneController::unlocked(Tuning::default(), 5);
        assert_eq!(c.handle_ui(UiEvent::Start), Flow::Continue);
        assert_eq!(c.scene(), Scene::Game);
        assert_eq!(c.state().current_level, 5);
        assert!(c.state().level_initialized);
        assert_eq!(c.state().arena.pins.count(), 2);
        assert_eq!(c.drain_events(), vec![GameEvent::Navigated]);
    }

    #[test]
    fn settings_and_level_select_navigation() {
        let mut c = controller();
        c.handle_ui(UiEvent::OpenSettings);
        assert_eq!(c.scene(), Scene::SettingsMenu);
        c.handle_ui(UiEvent::OpenLevelSelect);
        assert_eq!(c.scene(), Scene::LevelSelect);
        c.handle_ui(UiEvent::Back);
        assert_eq!(c.scene(), Scene::SettingsMenu);
        c.handle_ui(UiEvent::Back);
        assert_eq!(c.scene(), Scene::MainMenu);
        assert_eq!(c.drain_events().len(), 4);
    }

    #[test]
    fn locked_levels_cannot_be_picked() {
        let mut c = SceneController::unlocked(Tuning::default(), 3);
        c.handle_ui(UiEvent::OpenSettings);
        c.handle_ui(UiEvent::OpenLevelSelect);
        c.handle_ui(UiEvent::PickLevel(4));
        assert_eq!(c.scene(), Scene::LevelSelect);
        c.handle_ui(UiEvent::PickLevel(0));
        assert_eq!(c.scene(), Scene::LevelSelect);
        c.handle_ui(UiEvent::PickLevel(2));
        assert_eq!(c.scene(), Scene::Game);
        assert_eq!(c.state().current_level, 2);
    }

    #[test]
    fn level_entry_submits_typed_level() {
        let mut c = SceneController::unlocked(Tuning::default(), 12);
        c.handle_ui(UiEvent::OpenSettings);
        c.handle_ui(UiEvent::OpenLevelSelect);
        c.handle_ui(UiEvent::Digit(1));
        c.handle_ui(UiEvent::Digit(2));
        c.handle_ui(UiEvent::Digit(9));
        assert_eq!(c.state().level_entry.as_str(), "12");
        c.handle_ui(UiEvent::SubmitEntry);
        assert_eq!(c.scene(), Scene::Game);
        assert_eq!(c.state().current_level, 12);
        assert!(c.state().level_entry.is_empty());
    }

    #[test]
    fn locked_entry_is_cleared() {
        let mut c = controller();
        c.handle_ui(UiEvent::OpenSettings);
        c.handle_ui(UiEvent::OpenLevelSelect);
        c.handle_ui(UiEvent::Digit(9));
        c.handle_ui(UiEvent::SubmitEntry);
        assert_eq!(c.scene(), Scene::LevelSelect);
        assert!(c.state().level_entry.is_empty());
    }

    #[test]
    fn irrelevant_events_are_ignored() {
        let mut c = controller();
        assert_eq!(c.handle_ui(UiEvent::Exit), Flow::Continue);
        c.handle_ui(UiEvent::Retry);
        c.handle_ui(UiEvent::NextLevel);
        assert_eq!(c.scene(), Scene::MainMenu);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn toggle_music_only_in_settings() {
        let mut c = controller();
        c.handle_ui(UiEvent::ToggleMusic);
        assert!(c.drain_events().is_empty());
        c.handle_ui(UiEvent::OpenSettings);
        c.drain_events();
        c.handle_ui(UiEvent::ToggleMusic);
        assert_eq!(c.drain_events(), vec![GameEvent::MusicToggled]);
        assert_eq!(c.scene(), Scene::SettingsMenu);
    }

    #[test]
    fn update_outside_game_does_nothing() {
        let mut c = controller();
        assert!(c.update(&TickInput::fire(), 1.0 / 60.0).is_none());
        assert_eq!(c.state().arena.pins.count(), 0);
    }

    #[test]
    fn unlock_respects_level_cap() {
        let tuning = Tuning {
            max_level: Some(3),
            ..Tuning::default()
        };
        let c = SceneController::unlocked(tuning, 10);
        assert_eq!(c.state().highest_level_reached, 3);
    }
}
