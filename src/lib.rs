//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the pomo CLI.
//! It includes:
//! - Countdown engine driving focus and break sessions
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Type definitions for configuration and state
//! - Persistent storage for settings and the task checklist
//! - Native macOS notification system (macOS only)
//! - Sound playback for session-end chimes

pub mod cli;
pub mod daemon;
pub mod sound;
pub mod storage;
pub mod tasks;
pub mod types;

// macOS-specific notification system
#[cfg(target_os = "macos")]
pub mod notification;

// Re-export commonly used types for convenience
pub use types::{Countdown, IpcRequest, IpcResponse, Mode, ResponseData, Tick, TimerConfig};

// Re-export notification types on macOS
#[cfg(target_os = "macos")]
pub use notification::{
    MockNotificationSender, NotificationError, NotificationManager, NotificationSender,
};

// Re-export sound types
pub use sound::{
    discover_system_sounds, get_default_sound, try_create_player, MockSoundPlayer,
    RodioSoundPlayer, SoundError, SoundPlayer, SoundSettings, SoundSource,
};

// Re-export storage types
pub use storage::{Storage, StorageError};

// Re-export task checklist types
pub use tasks::{Task, TaskError, TaskFilter, TaskStore};
