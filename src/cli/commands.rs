//! Command definitions for the pomo CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::tasks::{TaskFilter, MAX_TASK_TEXT_LENGTH};
use crate::types::Mode;

// ============================================================================
// CLI Structure
// ============================================================================

/// pomo - A focus/break countdown timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomo",
    version,
    about = "A focus/break countdown timer with a task checklist",
    long_about = "A terminal Pomodoro timer. A background daemon counts down focus\n\
                  sessions and breaks, advances between them on expiry, and keeps a\n\
                  small task checklist alongside.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the countdown
    Start,

    /// Pause the countdown
    Pause,

    /// Reset the countdown to the current mode's full duration
    Reset,

    /// Show current timer status
    Status,

    /// Switch timer mode (focus, short-break, long-break)
    Mode {
        /// Mode to switch to
        mode: Mode,
    },

    /// Show or change the session durations
    Settings(SettingsArgs),

    /// Turn the completion chime on or off
    Sound {
        /// Whether the chime plays when a session completes
        #[arg(action = clap::ArgAction::Set, value_parser = parse_on_off, value_name = "on|off")]
        enabled: bool,
    },

    /// Manage the task checklist
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Run as daemon (background service)
    #[command(hide = true)]
    Daemon,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Settings Command Arguments
// ============================================================================

/// Arguments for the settings command.
///
/// With no arguments the current durations are shown; giving any duration
/// saves it (unspecified ones keep their current value).
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// New focus duration, as minutes or MM:SS
    #[arg(short, long, value_name = "MM[:SS]", value_parser = parse_duration)]
    pub focus: Option<u32>,

    /// New short break duration, as minutes or MM:SS
    #[arg(short, long, value_name = "MM[:SS]", value_parser = parse_duration)]
    pub short_break: Option<u32>,

    /// New long break duration, as minutes or MM:SS
    #[arg(short, long, value_name = "MM[:SS]", value_parser = parse_duration)]
    pub long_break: Option<u32>,
}

impl SettingsArgs {
    /// Returns true if any duration was given.
    pub fn is_update(&self) -> bool {
        self.focus.is_some() || self.short_break.is_some() || self.long_break.is_some()
    }
}

// ============================================================================
// Task Subcommands
// ============================================================================

/// Task checklist subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommands {
    /// Add a task to the checklist
    Add {
        /// Task description
        #[arg(value_parser = validate_task_text)]
        text: String,
    },

    /// List tasks
    List(TaskListArgs),

    /// Toggle a task between done and not done
    Done {
        /// Task id (shown by `pomo task list`)
        id: u64,
    },

    /// Remove a task from the checklist
    Remove {
        /// Task id (shown by `pomo task list`)
        id: u64,
    },
}

/// Arguments for the task list command
#[derive(Args, Debug, Clone, Default)]
pub struct TaskListArgs {
    /// Show every task (the default)
    #[arg(long, conflicts_with_all = ["active", "completed"])]
    pub all: bool,

    /// Show only tasks that are not done yet
    #[arg(long, conflicts_with = "completed")]
    pub active: bool,

    /// Show only tasks that are done
    #[arg(long)]
    pub completed: bool,
}

impl TaskListArgs {
    /// Returns the filter these flags select; no flags means everything.
    pub fn filter(&self) -> TaskFilter {
        if self.active {
            TaskFilter::Active
        } else if self.completed {
            TaskFilter::Completed
        } else {
            TaskFilter::All
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a duration given as whole minutes ("25") or MM:SS ("25:30").
fn parse_duration(s: &str) -> Result<u32, String> {
    let (minutes_part, seconds_part) = match s.split_once(':') {
        Some((m, sec)) => (m, Some(sec)),
        None => (s, None),
    };

    let minutes: u32 = minutes_part
        .parse()
        .map_err(|_| format!("invalid minutes '{}'", minutes_part))?;

    let seconds: u32 = match seconds_part {
        Some(part) => {
            let seconds: u32 = part
                .parse()
                .map_err(|_| format!("invalid seconds '{}'", part))?;
            if seconds >= 60 {
                return Err(format!("seconds must be below 60, got {}", seconds));
            }
            seconds
        }
        None => 0,
    };

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| format!("duration '{}' is too large", s))
}

/// Parses an on/off switch value.
fn parse_on_off(s: &str) -> Result<bool, String> {
    match s {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("expected 'on' or 'off', got '{}'", s)),
    }
}

/// Validates a task description.
///
/// - Must not be blank
/// - Must not exceed 100 characters
fn validate_task_text(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("task text cannot be empty".to_string());
    }
    if s.chars().count() > MAX_TASK_TEXT_LENGTH {
        return Err(format!(
            "task text must be {} characters or fewer",
            MAX_TASK_TEXT_LENGTH
        ));
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
