//! Core data types for the pomo timer.
//!
//! This module defines the data structures used for:
//! - The countdown clock and its tick outcomes
//! - The three timer modes and their fixed transition rule
//! - Per-mode duration configuration with clamping
//! - IPC request/response serialization

use serde::{Deserialize, Serialize};

// ============================================================================
// Mode
// ============================================================================

/// The three timer modes.
///
/// Modes advance on countdown expiry by a fixed rule (see [`Mode::next`]).
/// A long break is only ever entered by explicit selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// A focus session
    Focus,
    /// A short break between focus sessions
    ShortBreak,
    /// A longer break, entered manually
    LongBreak,
}

impl Mode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    /// Returns the human-readable label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Returns the mode that follows this one when its countdown expires.
    ///
    /// The rule is fixed: a focus session is followed by a short break,
    /// and every break is followed by a focus session. A long break is
    /// never scheduled automatically.
    pub fn next(&self) -> Mode {
        match self {
            Mode::Focus => Mode::ShortBreak,
            Mode::ShortBreak => Mode::Focus,
            Mode::LongBreak => Mode::Focus,
        }
    }

    /// Returns the alert text for a countdown that completed in this mode.
    pub fn completion_message(&self) -> &'static str {
        match self {
            Mode::Focus => "Time for a break!",
            Mode::ShortBreak | Mode::LongBreak => "Break is over, back to work!",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Focus
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(Mode::Focus),
            "short-break" => Ok(Mode::ShortBreak),
            "long-break" => Ok(Mode::LongBreak),
            _ => Err(format!(
                "unknown mode '{}' (expected: focus, short-break, long-break)",
                s
            )),
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Maximum focus duration in seconds (60 minutes).
pub const MAX_FOCUS_SECONDS: u32 = 60 * 60;

/// Maximum short break duration in seconds (30 minutes).
pub const MAX_SHORT_BREAK_SECONDS: u32 = 30 * 60;

/// Maximum long break duration in seconds (60 minutes).
pub const MAX_LONG_BREAK_SECONDS: u32 = 60 * 60;

/// Per-mode countdown durations, in whole seconds.
///
/// Every mode always has an entry. The config is replaced wholesale by a
/// settings save; out-of-range values are clamped to the nearest bound
/// rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    /// Focus session duration in seconds (0-3600)
    pub focus_seconds: u32,
    /// Short break duration in seconds (0-1800)
    pub short_break_seconds: u32,
    /// Long break duration in seconds (0-3600)
    pub long_break_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
        }
    }
}

impl TimerConfig {
    /// Returns the configured duration for the given mode.
    pub fn duration_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_seconds,
            Mode::ShortBreak => self.short_break_seconds,
            Mode::LongBreak => self.long_break_seconds,
        }
    }

    /// Returns the maximum allowed duration for the given mode.
    pub fn max_seconds_for(mode: Mode) -> u32 {
        match mode {
            Mode::Focus => MAX_FOCUS_SECONDS,
            Mode::ShortBreak => MAX_SHORT_BREAK_SECONDS,
            Mode::LongBreak => MAX_LONG_BREAK_SECONDS,
        }
    }

    /// Returns a copy with every duration clamped to its mode's bounds.
    pub fn clamped(mut self) -> Self {
        self.focus_seconds = self.focus_seconds.min(MAX_FOCUS_SECONDS);
        self.short_break_seconds = self.short_break_seconds.min(MAX_SHORT_BREAK_SECONDS);
        self.long_break_seconds = self.long_break_seconds.min(MAX_LONG_BREAK_SECONDS);
        self
    }

    /// Creates a new configuration with the specified focus duration.
    pub fn with_focus_seconds(mut self, seconds: u32) -> Self {
        self.focus_seconds = seconds;
        self
    }

    /// Creates a new configuration with the specified short break duration.
    pub fn with_short_break_seconds(mut self, seconds: u32) -> Self {
        self.short_break_seconds = seconds;
        self
    }

    /// Creates a new configuration with the specified long break duration.
    pub fn with_long_break_seconds(mut self, seconds: u32) -> Self {
        self.long_break_seconds = seconds;
        self
    }
}

// ============================================================================
// Countdown
// ============================================================================

/// Outcome of a single [`Countdown::tick`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The clock was not running; nothing changed.
    Idle,
    /// One second was counted down; the clock keeps running.
    Counting,
    /// The countdown reached zero on this tick and stopped.
    Expired,
}

/// A countdown clock over whole seconds.
///
/// The clock is a synchronous state transition function: it never schedules
/// anything itself and advances only when a caller delivers `tick()`. This
/// keeps the countdown deterministic and testable without real time; the
/// daemon supplies the one-second period in production.
///
/// Expiry is reported exactly once per start-to-zero run: the tick that
/// reaches zero returns [`Tick::Expired`] and stops the clock, and further
/// ticks are no-ops until `reset()` or `start()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    /// Remaining whole seconds
    pub remaining: u32,
    /// Whether the clock is actively counting down
    pub running: bool,
}

impl Countdown {
    /// Creates a stopped clock with the given remaining duration.
    pub fn new(remaining: u32) -> Self {
        Self {
            remaining,
            running: false,
        }
    }

    /// Starts (or resumes) the countdown.
    ///
    /// Starting at zero does not fire expiry synchronously; the next tick
    /// performs the expiry transition instead, so every expiry is reported
    /// from exactly one place.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Pauses the countdown. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Replaces the remaining duration and stops the clock.
    pub fn reset(&mut self, remaining: u32) {
        self.remaining = remaining;
        self.running = false;
    }

    /// Advances the clock by one second.
    ///
    /// While stopped this is a no-op. While running, the remaining time is
    /// decremented; the tick on which it reaches zero (or that finds it
    /// already at zero) stops the clock and reports [`Tick::Expired`].
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining > 0 {
                return Tick::Counting;
            }
        }
        self.running = false;
        Tick::Expired
    }

    /// Returns true if the clock is actively counting down.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start (or resume) the current countdown
    Start,
    /// Pause the current countdown
    Pause,
    /// Reset the countdown to the current mode's configured duration
    Reset,
    /// Switch to another mode
    SetMode {
        /// The mode to switch to
        mode: Mode,
    },
    /// Query the current duration settings
    Settings,
    /// Replace the duration settings wholesale
    SaveSettings {
        /// The new configuration
        #[serde(flatten)]
        config: TimerConfig,
    },
    /// Enable or disable the notification sound
    SetSound {
        /// Whether sound should play on cycle completion
        enabled: bool,
    },
    /// Query the current status
    Status,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Whether the countdown is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    /// Configured focus duration in seconds
    #[serde(rename = "focusSeconds", skip_serializing_if = "Option::is_none")]
    pub focus_seconds: Option<u32>,
    /// Configured short break duration in seconds
    #[serde(rename = "shortBreakSeconds", skip_serializing_if = "Option::is_none")]
    pub short_break_seconds: Option<u32>,
    /// Configured long break duration in seconds
    #[serde(rename = "longBreakSeconds", skip_serializing_if = "Option::is_none")]
    pub long_break_seconds: Option<u32>,
    /// Whether the notification sound is enabled
    #[serde(rename = "soundEnabled", skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
}

impl ResponseData {
    /// Creates response data from the current mode and clock.
    pub fn from_clock(mode: Mode, clock: &Countdown) -> Self {
        Self {
            mode: Some(mode),
            remaining_seconds: Some(clock.remaining),
            running: Some(clock.running),
            ..Self::default()
        }
    }

    /// Adds the duration settings to the response data.
    pub fn with_config(mut self, config: &TimerConfig) -> Self {
        self.focus_seconds = Some(config.focus_seconds);
        self.short_break_seconds = Some(config.short_break_seconds);
        self.long_break_seconds = Some(config.long_break_seconds);
        self
    }

    /// Adds the sound preference to the response data.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = Some(enabled);
        self
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
