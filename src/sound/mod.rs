//! Sound playback for session-end chimes.
//!
//! This module provides audio notification capabilities, including:
//!
//! - System sound discovery and playback
//! - Embedded fallback chime
//! - Non-blocking audio playback
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  SoundSettings   │     │   SoundPlayer    │
//! │  (on/off flag)   │     └────────┬─────────┘
//! └──────────────────┘              │
//!        consulted first            ▼
//!                          ┌──────────────────┐
//!                          │   SoundSource    │──▶ system sound dirs
//!                          │                  │──▶ embedded chime
//!                          └──────────────────┘
//! ```
//!
//! The on/off flag lives in [`SoundSettings`] rather than the player, so
//! request handlers on other tasks can flip it without touching the
//! audio stream (which is not `Send`).
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomo::sound::{get_default_sound, try_create_player, SoundSettings};
//!
//! let settings = SoundSettings::new(true);
//! if let Some(player) = try_create_player() {
//!     if settings.is_enabled() {
//!         let source = get_default_sound();
//!         player.play(&source).expect("playback failed");
//!     }
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

mod embedded;
mod error;
mod player;
mod source;

pub use embedded::{get_embedded_sound, get_embedded_sound_format, DEFAULT_SOUND_DATA};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{discover_system_sounds, get_default_sound, SoundSource};

// ============================================================================
// SoundPlayer trait
// ============================================================================

/// Trait for sound playback implementations.
///
/// Abstracts the playback backend, allowing the rodio player to be
/// replaced with a mock in tests.
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the
    /// background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }
}

// ============================================================================
// SoundSettings
// ============================================================================

/// Shared on/off switch for session-end chimes.
///
/// Thread-safe; the daemon shares one instance between the request
/// handler (which flips it) and the event loop (which consults it
/// before playing).
#[derive(Debug)]
pub struct SoundSettings {
    enabled: AtomicBool,
}

impl SoundSettings {
    /// Creates settings with the given initial state.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Returns true if chimes should play.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enables or disables chimes.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl Default for SoundSettings {
    /// Chimes are on unless the user turned them off.
    fn default() -> Self {
        Self::new(true)
    }
}

// ============================================================================
// MockSoundPlayer
// ============================================================================

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: std::sync::Mutex<Vec<SoundSource>>,
    available: AtomicBool,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: std::sync::Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // SoundSettings Tests
    // ------------------------------------------------------------------------

    mod settings_tests {
        use super::*;

        #[test]
        fn test_default_is_enabled() {
            let settings = SoundSettings::default();
            assert!(settings.is_enabled());
        }

        #[test]
        fn test_new_with_initial_state() {
            assert!(SoundSettings::new(true).is_enabled());
            assert!(!SoundSettings::new(false).is_enabled());
        }

        #[test]
        fn test_set_enabled() {
            let settings = SoundSettings::new(true);

            settings.set_enabled(false);
            assert!(!settings.is_enabled());

            settings.set_enabled(true);
            assert!(settings.is_enabled());
        }

        #[test]
        fn test_shared_across_threads() {
            let settings = std::sync::Arc::new(SoundSettings::new(true));

            let cloned = settings.clone();
            let handle = std::thread::spawn(move || cloned.set_enabled(false));
            handle.join().unwrap();

            assert!(!settings.is_enabled());
        }
    }

    // ------------------------------------------------------------------------
    // MockSoundPlayer Tests
    // ------------------------------------------------------------------------

    mod mock_player_tests {
        use super::*;

        #[test]
        fn test_mock_records_play_calls() {
            let mock = MockSoundPlayer::new();

            mock.play(&SoundSource::embedded("default")).unwrap();
            mock.play(&SoundSource::system("Glass", "/path/Glass.aiff"))
                .unwrap();

            assert_eq!(mock.play_count(), 2);
            let calls = mock.get_play_calls();
            assert_eq!(calls[0].name(), "default");
            assert_eq!(calls[1].name(), "Glass");
        }

        #[test]
        fn test_mock_failure_mode() {
            let mock = MockSoundPlayer::new();
            mock.set_should_fail(true);

            let result = mock.play(&SoundSource::embedded("default"));
            assert!(result.is_err());
            assert_eq!(mock.play_count(), 0);
        }

        #[test]
        fn test_mock_availability() {
            let mock = MockSoundPlayer::new();
            assert!(mock.is_available());

            mock.set_available(false);
            assert!(!mock.is_available());
        }

        #[test]
        fn test_mock_clear_calls() {
            let mock = MockSoundPlayer::new();
            mock.play(&SoundSource::embedded("default")).unwrap();

            mock.clear_calls();
            assert_eq!(mock.play_count(), 0);
        }
    }
}
