//! Navigation events and the level-select number entry
//!
//! Button hit-testing happens in the presentation layer; it reports which
//! control was activated as a `UiEvent`.

use serde::{Deserialize, Serialize};

/// A navigation action from the menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// Main menu: play from the highest unlocked level
    Start,
    /// Main menu: open settings
    OpenSettings,
    /// Settings: open level select
    OpenLevelSelect,
    /// Settings -> main menu, level select -> settings
    Back,
    /// Level select: jump straight to a level
    PickLevel(u32),
    /// Level select: type a digit into the level entry
    Digit(u8),
    /// Level select: clear the level entry
    ClearEntry,
    /// Level select: play the level typed into the entry
    SubmitEntry,
    /// Settings: switch background music on/off
    ToggleMusic,
    /// Level complete: continue with the next level
    NextLevel,
    /// Fail: replay the same level
    Retry,
    /// Fail / level complete: back to the main menu
    ToMenu,
    /// Fail: quit the game
    Exit,
}

/// Maximum digits the level entry accepts
pub const LEVEL_ENTRY_DIGITS: usize = 2;

/// Typed level number on the level-select screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    digits: String,
}

impl LevelEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit; ignored when not 0-9 or the buffer is full
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || self.digits.len() >= LEVEL_ENTRY_DIGITS {
            return false;
        }
        self.digits.push(char::from(b'0' + digit));
        true
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Current text, for display
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Parsed level number (None when empty)
    pub fn value(&self) -> Option<u32> {
        self.digits.parse().ok()
    }

    /// Take the typed level and empty the buffer
    pub fn take(&mut self) -> Option<u32> {
        let value = self.value();
        self.clear();
        value
    }
}
