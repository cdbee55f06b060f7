//! Sound player implementation using rodio.
//!
//! `RodioSoundPlayer` wraps the rodio v0.20 output stream. The stream is
//! not `Send`, so the player lives on the task that created it; whether a
//! chime should play at all is decided by [`super::SoundSettings`] before
//! the player is asked.

use std::fs::File;
use std::io::{BufReader, Cursor};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::embedded::get_embedded_sound;
use super::error::SoundError;
use super::source::SoundSource;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// This method is non-blocking; the sound plays in the background.
    /// If playback fails for a system sound, it automatically falls back
    /// to the embedded chime.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sound file cannot be opened (for system sounds)
    /// - The audio format cannot be decoded
    /// - Audio playback fails
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::System { path, name } => {
                debug!("Playing system sound: {}", name);
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        warn!(
                            "Failed to play system sound '{}': {}, falling back to embedded",
                            name, e
                        );
                        self.play_embedded()
                    }
                }
            }
            SoundSource::Embedded { name } => {
                debug!("Playing embedded sound: {}", name);
                self.play_embedded()
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let reader = BufReader::new(file);
        let decoder = Decoder::new(reader).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        self.play_decoder(decoder)
    }

    /// Plays the embedded fallback chime.
    fn play_embedded(&self) -> Result<(), SoundError> {
        let cursor = Cursor::new(get_embedded_sound());
        let decoder = Decoder::new(cursor)
            .map_err(|e| SoundError::DecodeError(format!("embedded sound: {}", e)))?;

        self.play_decoder(decoder)
    }

    /// Plays a decoded audio source.
    fn play_decoder<R>(&self, decoder: Decoder<R>) -> Result<(), SoundError>
    where
        R: std::io::Read + std::io::Seek + Send + Sync + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.append(decoder);
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!("Sound playback started (detached)");
        Ok(())
    }

    /// Returns true if the audio system is available.
    ///
    /// Always true for a successfully created player, as the audio stream
    /// is initialized during construction.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is
/// returned; the daemon then runs without chimes.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, running without sound: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests may run in environments without audio hardware (e.g. CI
    // containers), so player creation failures are treated as a skip.

    #[test]
    fn test_play_embedded_sound() {
        let player = match RodioSoundPlayer::new() {
            Ok(p) => p,
            Err(_) => return, // Skip test if no audio
        };

        let source = SoundSource::embedded("default");
        assert!(player.play(&source).is_ok());
    }

    #[test]
    fn test_try_create_player_does_not_panic() {
        // Returns None or Some depending on audio availability
        let _result = try_create_player();
    }

    #[test]
    fn test_debug_impl() {
        let player = match RodioSoundPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("RodioSoundPlayer"));
    }

    #[test]
    fn test_is_available() {
        let player = match RodioSoundPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        assert!(player.is_available());
    }

    #[test]
    fn test_play_nonexistent_file_falls_back() {
        let player = match RodioSoundPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        // A missing system sound should fall back to the embedded chime
        let source = SoundSource::system("NonExistent", "/nonexistent/path/to/sound.wav");
        let _ = player.play(&source);
    }
}
