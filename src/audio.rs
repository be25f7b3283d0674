//! Audio routing
//!
//! Playback is done by the platform layer through an `AudioSink`. The
//! `AudioManager` turns gameplay events into sink calls, applies the player's
//! volume settings and owns the background music on/off state.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Pin fired from the launcher
    Fire,
    /// Level cleared
    LevelComplete,
    /// Fail scene reached
    Fail,
}

/// Fire-and-forget playback target implemented by the platform layer
pub trait AudioSink {
    /// Pin `index` attached to the ring
    fn on_attach(&mut self, index: usize, volume: f32);
    /// Pins `first` and `second` collided
    fn on_collision(&mut self, first: usize, second: usize, volume: f32);
    /// A menu navigation happened
    fn on_navigate(&mut self, volume: f32);
    /// One-shot effect without a dedicated hook
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    /// Start (volume > 0) or stop (volume == 0) the background music
    fn set_music(&mut self, _volume: f32) {}
}

/// Sink that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn on_attach(&mut self, _index: usize, _volume: f32) {}
    fn on_collision(&mut self, _first: usize, _second: usize, _volume: f32) {}
    fn on_navigate(&mut self, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    settings: Settings,
}

impl<S: AudioSink> AudioManager<S> {
    /// Wrap a sink and start music according to `settings`
    pub fn new(sink: S, settings: Settings) -> Self {
        let mut manager = Self { sink, settings };
        manager.apply_music();
        manager
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mute or unmute everything
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.apply_music();
    }

    /// Replace all settings (e.g. after the player edits them)
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.apply_music();
    }

    fn apply_music(&mut self) {
        self.sink.set_music(self.settings.effective_music_volume());
    }

    /// Route a batch of gameplay events to the sink
    pub fn handle(&mut self, events: &[GameEvent]) {
        for event in events {
            self.handle_event(*event);
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        if let GameEvent::MusicToggled = event {
            self.settings.music_enabled = !self.settings.music_enabled;
            log::info!(
                "Music {}",
                if self.settings.music_enabled { "on" } else { "off" }
            );
            self.apply_music();
            return;
        }

        let volume = self.settings.effective_sfx_volume();
        if volume <= 0.0 {
            return;
        }
        match event {
            GameEvent::PinFired { .. } => self.sink.play(SoundEffect::Fire, volume),
            GameEvent::PinAttached { index } => self.sink.on_attach(index, volume),
            GameEvent::PinsCollided { first, second } => {
                self.sink.on_collision(first, second, volume)
            }
            GameEvent::Failed => self.sink.play(SoundEffect::Fail, volume),
            GameEvent::LevelComplete { .. } => self.sink.play(SoundEffect::LevelComplete, volume),
            GameEvent::Navigated => self.sink.on_navigate(volume),
            GameEvent::MusicToggled => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        music: f32,
    }

    impl AudioSink for Recorder {
        fn on_attach(&mut self, index: usize, _volume: f32) {
            self.calls.push(format!("attach {index}"));
        }
        fn on_collision(&mut self, first: usize, second: usize, _volume: f32) {
            self.calls.push(format!("collide {first} {second}"));
        }
        fn on_navigate(&mut self, _volume: f32) {
            self.calls.push("navigate".into());
        }
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.calls.push(format!("{effect:?}"));
        }
        fn set_music(&mut self, volume: f32) {
            self.music = volume;
        }
    }

    #[test]
    fn routes_events_to_sink() {
        let mut audio = AudioManager::new(Recorder::default(), Settings::default());
        audio.handle(&[
            GameEvent::PinFired { index: 2 },
            GameEvent::PinAttached { index: 2 },
            GameEvent::PinsCollided { first: 3, second: 1 },
            GameEvent::Navigated,
            GameEvent::LevelComplete { level: 1 },
            GameEvent::Failed,
        ]);
        assert_eq!(
            audio.sink().calls,
            vec!["Fire", "attach 2", "collide 3 1", "navigate", "LevelComplete", "Fail"]
        );
    }

    #[test]
    fn muted_drops_effects() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), settings);
        audio.handle(&[GameEvent::PinAttached { index: 0 }]);
        assert!(audio.sink().calls.is_empty());
        assert_eq!(audio.sink().music, 0.0);
    }

    #[test]
    fn toggle_switches_music() {
        let mut audio = AudioManager::new(Recorder::default(), Settings::default());
        assert!(audio.sink().music > 0.0);
        audio.handle(&[GameEvent::MusicToggled]);
        assert!(!audio.settings().music_enabled);
        assert_eq!(audio.sink().music, 0.0);
        audio.handle(&[GameEvent::MusicToggled]);
        assert!(audio.sink().music > 0.0);
    }
}
