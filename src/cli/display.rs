//! Display utilities for the pomo CLI.
//!
//! This module provides formatted output for:
//! - Success messages
//! - Error messages
//! - Status and settings display
//! - Task checklist rendering

use crate::tasks::Task;
use crate::types::{IpcResponse, Mode};

// ============================================================================
// Constants
// ============================================================================

/// ANSI escape for red (focus)
const RED: &str = "\x1b[31m";

/// ANSI escape for green (short break)
const GREEN: &str = "\x1b[32m";

/// ANSI escape for blue (long break)
const BLUE: &str = "\x1b[34m";

/// ANSI reset
const RESET: &str = "\x1b[0m";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a success message for timer start.
    pub fn show_start_success(response: &IpcResponse) {
        println!("* Timer started");

        if let Some(data) = &response.data {
            if let Some(mode) = data.mode {
                println!("  Mode: {}", Self::colored_label(mode));
            }
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("  Remaining: {:02}:{:02}", minutes, seconds);
            }
        }
    }

    /// Shows a success message for timer pause.
    pub fn show_pause_success(response: &IpcResponse) {
        println!("|| Timer paused");

        if let Some(data) = &response.data {
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("  Remaining: {:02}:{:02}", minutes, seconds);
            }
        }
    }

    /// Shows a success message for timer reset.
    pub fn show_reset_success(response: &IpcResponse) {
        println!("[] Timer reset");

        if let Some(data) = &response.data {
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("  Remaining: {:02}:{:02}", minutes, seconds);
            }
        }
    }

    /// Shows a success message for a mode change.
    pub fn show_mode_changed(response: &IpcResponse) {
        if let Some(data) = &response.data {
            if let Some(mode) = data.mode {
                println!("> Switched to {}", Self::colored_label(mode));
            }
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("  Remaining: {:02}:{:02}", minutes, seconds);
            }
        }
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        println!("Pomodoro Timer Status");
        println!("─────────────────────────────");

        if let Some(data) = &response.data {
            if let Some(mode) = data.mode {
                println!("Mode: {}", Self::colored_label(mode));
            }
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("Remaining: {:02}:{:02}", minutes, seconds);
            }
            if let Some(running) = data.running {
                println!("State: {}", if running { "running" } else { "paused" });
            }
        } else {
            println!("No status available");
        }
    }

    /// Shows the configured durations.
    pub fn show_settings(response: &IpcResponse) {
        println!("Timer Settings");
        println!("─────────────────────────────");

        if let Some(data) = &response.data {
            if let Some(focus) = data.focus_seconds {
                let (minutes, seconds) = Self::format_time(focus);
                println!("Focus:       {:02}:{:02}", minutes, seconds);
            }
            if let Some(short_break) = data.short_break_seconds {
                let (minutes, seconds) = Self::format_time(short_break);
                println!("Short break: {:02}:{:02}", minutes, seconds);
            }
            if let Some(long_break) = data.long_break_seconds {
                let (minutes, seconds) = Self::format_time(long_break);
                println!("Long break:  {:02}:{:02}", minutes, seconds);
            }
        }
    }

    /// Shows a confirmation after settings are saved.
    pub fn show_settings_saved(response: &IpcResponse) {
        println!("* Settings saved");

        if let Some(data) = &response.data {
            if let Some(focus) = data.focus_seconds {
                let (minutes, seconds) = Self::format_time(focus);
                println!("  Focus:       {:02}:{:02}", minutes, seconds);
            }
            if let Some(short_break) = data.short_break_seconds {
                let (minutes, seconds) = Self::format_time(short_break);
                println!("  Short break: {:02}:{:02}", minutes, seconds);
            }
            if let Some(long_break) = data.long_break_seconds {
                let (minutes, seconds) = Self::format_time(long_break);
                println!("  Long break:  {:02}:{:02}", minutes, seconds);
            }
        }
    }

    /// Shows the sound preference after a change.
    pub fn show_sound(response: &IpcResponse) {
        if let Some(enabled) = response.data.as_ref().and_then(|d| d.sound_enabled) {
            println!("* Sound {}", if enabled { "on" } else { "off" });
        } else {
            println!("* {}", response.message);
        }
    }

    /// Shows the task checklist.
    pub fn show_task_list(tasks: &[&Task]) {
        println!("Focus Tasks");
        println!("─────────────────────────────");

        if tasks.is_empty() {
            println!("No tasks yet. Time to focus!");
            return;
        }

        for task in tasks {
            let marker = if task.completed { "[x]" } else { "[ ]" };
            println!("{} #{} {}", marker, task.id, task.text);
        }
    }

    /// Shows a confirmation for a newly added task.
    pub fn show_task_added(task: &Task) {
        println!("* Added task #{}: {}", task.id, task.text);
    }

    /// Shows a confirmation after a task's completion is toggled.
    pub fn show_task_toggled(task: &Task) {
        if task.completed {
            println!("* Task #{} done: {}", task.id, task.text);
        } else {
            println!("* Task #{} reopened: {}", task.id, task.text);
        }
    }

    /// Shows a confirmation for a removed task.
    pub fn show_task_removed(task: &Task) {
        println!("* Removed task #{}: {}", task.id, task.text);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }

    /// Wraps a mode label in its ANSI color.
    fn colored_label(mode: Mode) -> String {
        let color = match mode {
            Mode::Focus => RED,
            Mode::ShortBreak => GREEN,
            Mode::LongBreak => BLUE,
        };
        format!("{}{}{}", color, mode.label(), RESET)
    }
}

// ============================================================================
// Tests
// ============================================================================
