//! macOS notification system integration.
//!
//! This module provides native macOS notification support using
//! `objc2-user-notifications`. It includes:
//!
//! - Notification authorization handling
//! - Mode-specific alert content ("Time for a break!" and friends)
//! - Delegate-based foreground presentation
//! - Async-friendly APIs
//!
//! # Example
//!
//! ```rust,ignore
//! use pomo::notification::try_create_manager;
//! use pomo::types::Mode;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // None when notifications are unavailable; the caller degrades silently
//!     if let Some(manager) = try_create_manager().await {
//!         manager.notify_cycle_complete(Mode::Focus).await.ok();
//!     }
//! }
//! ```
//!
//! # Requirements
//!
//! - macOS 10.14+
//! - The binary must be code-signed for notifications to work properly
//!
//! # Code Signing
//!
//! For development, use ad-hoc signing:
//! ```bash
//! codesign --force --deep --sign - target/release/pomo
//! ```

mod center;
mod content;
mod delegate;
pub mod error;
mod request;

use objc2::rc::Retained;
use objc2::MainThreadMarker;

pub use self::content::{create_cycle_complete_content, NotificationContentBuilder};
pub use self::delegate::NotificationDelegate;
pub use self::error::NotificationError;

use self::center::NotificationCenter;
use self::request::create_notification_request;

use crate::types::Mode;

/// Manages the notification system.
///
/// This is the main entry point for delivering cycle-completion alerts.
pub struct NotificationManager {
    /// Retained delegate to keep it alive.
    _delegate: Retained<NotificationDelegate>,
}

impl NotificationManager {
    /// Creates a new notification manager.
    ///
    /// This will:
    /// 1. Request notification authorization from the user
    /// 2. Set up the notification delegate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Authorization is denied
    /// - Not running on the main thread
    /// - System notification center is unavailable
    pub async fn new() -> Result<Self, NotificationError> {
        // Verify we're on the main thread
        let mtm = MainThreadMarker::new().ok_or_else(|| {
            NotificationError::InitializationFailed(
                "notifications must be set up on the main thread".to_string(),
            )
        })?;

        // Request authorization
        let granted = NotificationCenter::request_authorization().await?;
        if !granted {
            return Err(NotificationError::PermissionDenied);
        }

        // Create and set delegate
        let delegate = NotificationDelegate::new(mtm);
        NotificationCenter::set_delegate(&NotificationDelegate::as_protocol(&delegate));

        Ok(Self {
            _delegate: delegate,
        })
    }

    /// Delivers the alert for a countdown that completed in `previous`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification center rejects the request.
    pub async fn notify_cycle_complete(&self, previous: Mode) -> Result<(), NotificationError> {
        let content = create_cycle_complete_content(previous);
        let request = create_notification_request(&content);
        NotificationCenter::add_notification_request(&request).await
    }
}

/// Creates a notification manager, or `None` when alerts are unavailable.
///
/// Initialization failures are logged and swallowed so the daemon can run
/// without the alert channel.
pub async fn try_create_manager() -> Option<NotificationManager> {
    match NotificationManager::new().await {
        Ok(manager) => Some(manager),
        Err(e) if e.is_permission_error() => {
            tracing::warn!("Notification permission denied, running without alerts");
            tracing::info!("Enable alerts in System Settings > Notifications");
            None
        }
        Err(e) => {
            tracing::warn!("Notifications unavailable, running without alerts: {}", e);
            None
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait NotificationSender {
    async fn send_cycle_complete(&self, previous: Mode) -> Result<(), NotificationError>;
    fn is_available(&self) -> bool;
}

impl NotificationSender for NotificationManager {
    async fn send_cycle_complete(&self, previous: Mode) -> Result<(), NotificationError> {
        self.notify_cycle_complete(previous).await
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct MockNotificationSender {
    notifications: std::sync::Mutex<Vec<Mode>>,
    available: std::sync::atomic::AtomicBool,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
            available: std::sync::atomic::AtomicBool::new(true),
            should_fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available
            .store(available, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<Mode> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn clear_recorded(&self) {
        self.notifications.lock().unwrap().clear();
    }
}

impl NotificationSender for MockNotificationSender {
    async fn send_cycle_complete(&self, previous: Mode) -> Result<(), NotificationError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications.lock().unwrap().push(previous);
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(std::sync::atomic::Ordering::SeqCst)
    }
}
