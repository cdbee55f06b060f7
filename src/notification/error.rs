//! Notification system error types.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to request notification authorization from the system.
    #[error("Failed to request notification authorization: {0}")]
    AuthorizationFailed(String),

    /// Notification permission was denied by the user.
    #[error("Notification permission denied")]
    PermissionDenied,

    /// Failed to deliver a notification.
    #[error("Failed to deliver notification: {0}")]
    SendFailed(String),

    /// Failed to initialize the notification system.
    #[error("Failed to initialize notifications: {0}")]
    InitializationFailed(String),
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::AuthorizationFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::PermissionDenied;
        assert_eq!(err.to_string(), "Notification permission denied");

        let err = NotificationError::SendFailed("center unavailable".to_string());
        assert!(err.to_string().contains("center unavailable"));
    }

    #[test]
    fn test_is_permission_error() {
        assert!(NotificationError::PermissionDenied.is_permission_error());
        assert!(NotificationError::AuthorizationFailed("x".into()).is_permission_error());
        assert!(!NotificationError::SendFailed("x".into()).is_permission_error());
    }
}
