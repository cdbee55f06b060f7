//! Notification content construction.
//!
//! This module provides a builder for creating notification content
//! with a fluent API, plus the cycle-completion content used by the
//! daemon event loop.

use objc2::rc::Retained;
use objc2_foundation::NSString;
use objc2_user_notifications::UNMutableNotificationContent;

use crate::types::Mode;

/// Builder for constructing notification content.
pub struct NotificationContentBuilder {
    content: Retained<UNMutableNotificationContent>,
}

impl NotificationContentBuilder {
    /// Creates a new notification content builder.
    #[must_use]
    pub fn new() -> Self {
        let content = unsafe { UNMutableNotificationContent::new() };
        Self { content }
    }

    /// Sets the notification title.
    #[must_use]
    pub fn title(self, title: &str) -> Self {
        let title = NSString::from_str(title);
        unsafe {
            self.content.setTitle(&title);
        }
        self
    }

    /// Sets the notification body text.
    #[must_use]
    pub fn body(self, body: &str) -> Self {
        let body = NSString::from_str(body);
        unsafe {
            self.content.setBody(&body);
        }
        self
    }

    /// Builds and returns the notification content.
    #[must_use]
    pub fn build(self) -> Retained<UNMutableNotificationContent> {
        self.content
    }
}

impl Default for NotificationContentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the notification title for a countdown that completed in
/// the given mode.
fn title_for(previous: Mode) -> &'static str {
    match previous {
        Mode::Focus => "🍅 Pomodoro Timer",
        Mode::ShortBreak | Mode::LongBreak => "☕ Pomodoro Timer",
    }
}

/// Creates notification content for a completed countdown.
///
/// The alert carries no sound of its own; the audible cue is the
/// daemon's chime, governed by the sound preference.
#[must_use]
pub fn create_cycle_complete_content(previous: Mode) -> Retained<UNMutableNotificationContent> {
    NotificationContentBuilder::new()
        .title(title_for(previous))
        .body(previous.completion_message())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_for_focus() {
        assert!(title_for(Mode::Focus).contains("Pomodoro Timer"));
    }

    #[test]
    fn test_title_for_breaks_match() {
        assert_eq!(title_for(Mode::ShortBreak), title_for(Mode::LongBreak));
        assert_ne!(title_for(Mode::Focus), title_for(Mode::ShortBreak));
    }
}
