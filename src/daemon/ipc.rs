//! IPC server for the pomo daemon.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for timer commands
//! - Integration with TimerEngine for command execution

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::sound::SoundSettings;
use crate::storage::{Storage, APP_DIR_NAME};
use crate::types::{IpcRequest, IpcResponse, Mode, ResponseData, TimerConfig};

use super::timer::TimerEngine;

// ============================================================================
// Constants
// ============================================================================

/// Socket file name inside the data directory.
pub const SOCKET_FILE_NAME: &str = "pomo.sock";

/// Maximum request size in bytes (4KB)
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

/// Returns the default socket path (`~/.pomo/pomo.sock`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_socket_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(APP_DIR_NAME).join(SOCKET_FILE_NAME))
}

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Request too large
    #[error("Request too large (max {MAX_REQUEST_SIZE} bytes)")]
    RequestTooLarge,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    /// Unix socket listener
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// If the socket file already exists, it will be removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        // Remove existing socket file if present
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Applies a read timeout to prevent blocking indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = vec![0u8; MAX_REQUEST_SIZE];

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            anyhow::bail!("Connection closed by client");
        }
        if n == MAX_REQUEST_SIZE {
            return Err(IpcError::RequestTooLarge.into());
        }

        let request: IpcRequest = serde_json::from_slice(&buffer[..n])
            .with_context(|| "Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        // Clean up socket file on drop
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the timer engine and the
/// user preference stores.
pub struct RequestHandler {
    /// Shared reference to the timer engine
    engine: Arc<Mutex<TimerEngine>>,
    /// Shared sound on/off switch
    sound: Arc<SoundSettings>,
    /// Blob store for persisted preferences
    storage: Storage,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(engine: Arc<Mutex<TimerEngine>>, sound: Arc<SoundSettings>, storage: Storage) -> Self {
        Self {
            engine,
            sound,
            storage,
        }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::SetMode { mode } => self.handle_set_mode(mode).await,
            IpcRequest::Settings => self.handle_settings().await,
            IpcRequest::SaveSettings { config } => self.handle_save_settings(config).await,
            IpcRequest::SetSound { enabled } => self.handle_set_sound(enabled).await,
            IpcRequest::Status => self.handle_status().await,
        }
    }

    /// Handles the start command.
    async fn handle_start(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.start() {
            Ok(()) => IpcResponse::success(
                "Timer started",
                Some(ResponseData::from_clock(engine.mode(), engine.clock())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the pause command.
    async fn handle_pause(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.pause() {
            Ok(()) => IpcResponse::success(
                "Timer paused",
                Some(ResponseData::from_clock(engine.mode(), engine.clock())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the reset command.
    async fn handle_reset(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.reset() {
            Ok(()) => IpcResponse::success(
                "Timer reset",
                Some(ResponseData::from_clock(engine.mode(), engine.clock())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the setmode command.
    async fn handle_set_mode(&self, mode: Mode) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.set_mode(mode) {
            Ok(()) => IpcResponse::success(
                format!("Mode set to {}", mode.label()),
                Some(ResponseData::from_clock(engine.mode(), engine.clock())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the settings query.
    async fn handle_settings(&self) -> IpcResponse {
        let engine = self.engine.lock().await;

        let data = ResponseData::default()
            .with_config(engine.config())
            .with_sound(self.sound.is_enabled());
        IpcResponse::success("", Some(data))
    }

    /// Handles the savesettings command.
    async fn handle_save_settings(&self, config: TimerConfig) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.save_config(config) {
            Ok(()) => {
                // Echo back the applied (clamped) values
                let data = ResponseData::from_clock(engine.mode(), engine.clock())
                    .with_config(engine.config());
                IpcResponse::success("Settings saved", Some(data))
            }
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the setsound command.
    async fn handle_set_sound(&self, enabled: bool) -> IpcResponse {
        self.sound.set_enabled(enabled);

        if let Err(e) = self.storage.save_sound_enabled(enabled) {
            return IpcResponse::error(format!("Failed to save sound preference: {}", e));
        }

        let message = if enabled {
            "Sound enabled"
        } else {
            "Sound disabled"
        };
        IpcResponse::success(message, Some(ResponseData::default().with_sound(enabled)))
    }

    /// Handles the status query.
    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;

        IpcResponse::success(
            "",
            Some(ResponseData::from_clock(engine.mode(), engine.clock())),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
