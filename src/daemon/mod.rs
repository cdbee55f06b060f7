//! Daemon module for pomo.
//!
//! This module contains the core daemon functionality:
//! - `timer`: Timer engine with mode transitions and countdown logic
//! - `ipc`: Unix Domain Socket server and request dispatch
//!
//! [`run`] wires everything together: a ticker task drives the engine
//! once per second, the IPC server serves CLI clients, and timer events
//! fan out to chime and notification side effects.

pub mod ipc;
pub mod timer;

pub use ipc::{default_socket_path, IpcServer, RequestHandler};
pub use timer::{TimerEngine, TimerEvent};

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::sound::{get_default_sound, try_create_player, SoundSettings};
use crate::storage::Storage;
use crate::types::{IpcResponse, TimerConfig};

/// Runs the daemon until interrupted.
///
/// Listens on the default socket path and serves timer commands. The
/// socket file is removed on shutdown.
///
/// # Errors
///
/// Returns an error if the data directory or the socket cannot be set
/// up. Runtime failures (a bad request, a chime that cannot play) are
/// logged and do not stop the daemon.
pub async fn run() -> Result<()> {
    // Persisted preferences
    let storage = Storage::open_default().context("Failed to open data directory")?;
    let sound_settings = Arc::new(SoundSettings::new(storage.load_sound_enabled()));

    // Audio output; the daemon runs without chimes when unavailable.
    // The player stays on this task because the audio stream is not Send.
    let player = try_create_player();

    #[cfg(target_os = "macos")]
    let notifications = crate::notification::try_create_manager().await;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(Mutex::new(TimerEngine::new(TimerConfig::default(), event_tx)));

    let socket_path = default_socket_path()?;
    let server = IpcServer::new(&socket_path)?;
    let handler = RequestHandler::new(engine.clone(), sound_settings.clone(), storage);
    info!("Daemon listening on {:?}", server.socket_path());

    let ticker = tokio::spawn(run_ticker(engine.clone()));

    loop {
        tokio::select! {
            accepted = server.accept() => {
                match accepted {
                    Ok(mut stream) => match IpcServer::receive_request(&mut stream).await {
                        Ok(request) => {
                            debug!("Handling request: {:?}", request);
                            let response = handler.handle(request).await;
                            if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
                                warn!("Failed to send response: {}", e);
                            }
                        }
                        Err(e) => {
                            warn!("Invalid request: {}", e);
                            let response = IpcResponse::error(e.to_string());
                            let _ = IpcServer::send_response(&mut stream, &response).await;
                        }
                    },
                    Err(e) => warn!("Failed to accept connection: {}", e),
                }
            }
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                debug!("Timer event: {:?}", event);

                if let TimerEvent::CycleCompleted { previous, next } = event {
                    info!("Cycle complete: {} -> {}", previous.label(), next.label());

                    if sound_settings.is_enabled() {
                        if let Some(player) = player.as_ref() {
                            if let Err(e) = player.play(&get_default_sound()) {
                                warn!("Failed to play chime: {}", e);
                            }
                        }
                    }

                    #[cfg(target_os = "macos")]
                    if let Some(manager) = notifications.as_ref() {
                        if let Err(e) = manager.notify_cycle_complete(previous).await {
                            warn!("Failed to deliver notification: {}", e);
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    ticker.abort();
    Ok(())
}

/// Drives the engine with one tick per second.
///
/// The generation is snapshotted before each period so a tick that
/// raced a clock replacement identifies itself as stale and is dropped
/// by the engine instead of decrementing the wrong countdown.
async fn run_ticker(engine: Arc<Mutex<TimerEngine>>) {
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let generation = engine.lock().await.generation();
        ticker.tick().await;

        if let Err(e) = engine.lock().await.tick(generation) {
            error!("Tick failed: {}", e);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
