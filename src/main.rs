//! pomo - a terminal Pomodoro timer
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break when you need one

use anyhow::Result;
use clap::{CommandFactory, Parser};

use pomo::cli::{Cli, Commands, Display, IpcClient, TaskCommands};
use pomo::storage::Storage;
use pomo::tasks::TaskStore;
use pomo::types::TimerConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    // Set verbose logging if requested
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Start) => {
            let client = IpcClient::new()?;
            let response = client.start().await?;
            Display::show_start_success(&response);
        }
        Some(Commands::Pause) => {
            let client = IpcClient::new()?;
            let response = client.pause().await?;
            Display::show_pause_success(&response);
        }
        Some(Commands::Reset) => {
            let client = IpcClient::new()?;
            let response = client.reset().await?;
            Display::show_reset_success(&response);
        }
        Some(Commands::Status) => {
            let client = IpcClient::new()?;
            let response = client.status().await?;
            Display::show_status(&response);
        }
        Some(Commands::Mode { mode }) => {
            let client = IpcClient::new()?;
            let response = client.set_mode(mode).await?;
            Display::show_mode_changed(&response);
        }
        Some(Commands::Settings(args)) => {
            let client = IpcClient::new()?;

            if args.is_update() {
                // Overlay the given flags onto the daemon's current values
                let current = client.settings().await?;
                let mut config = TimerConfig::default();
                if let Some(data) = &current.data {
                    if let Some(focus) = data.focus_seconds {
                        config.focus_seconds = focus;
                    }
                    if let Some(short_break) = data.short_break_seconds {
                        config.short_break_seconds = short_break;
                    }
                    if let Some(long_break) = data.long_break_seconds {
                        config.long_break_seconds = long_break;
                    }
                }
                if let Some(focus) = args.focus {
                    config.focus_seconds = focus;
                }
                if let Some(short_break) = args.short_break {
                    config.short_break_seconds = short_break;
                }
                if let Some(long_break) = args.long_break {
                    config.long_break_seconds = long_break;
                }

                let response = client.save_settings(config).await?;
                Display::show_settings_saved(&response);
            } else {
                let response = client.settings().await?;
                Display::show_settings(&response);
            }
        }
        Some(Commands::Sound { enabled }) => {
            let client = IpcClient::new()?;
            let response = client.set_sound(enabled).await?;
            Display::show_sound(&response);
        }
        Some(Commands::Task { command }) => {
            execute_task_command(command)?;
        }
        Some(Commands::Daemon) => {
            pomo::daemon::run().await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Executes a task checklist command against local storage.
///
/// The checklist never goes through the daemon; each CLI invocation
/// loads the list, applies one change, and persists it.
fn execute_task_command(command: TaskCommands) -> Result<()> {
    let storage = Storage::open_default()?;
    let mut store = TaskStore::load(storage)?;

    match command {
        TaskCommands::Add { text } => {
            let task = store.add(&text)?;
            Display::show_task_added(&task);
        }
        TaskCommands::List(args) => {
            let tasks = store.tasks(args.filter());
            Display::show_task_list(&tasks);
        }
        TaskCommands::Done { id } => {
            let task = store.toggle(id)?;
            Display::show_task_toggled(&task);
        }
        TaskCommands::Remove { id } => {
            let task = store.remove(id)?;
            Display::show_task_removed(&task);
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
