//! Notification and toast surfaces for running in a terminal

use crate::remediation::{Feedback, Notifier};
use crate::wifi::Notification;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Prints notifications and keeps the latest one per id until it is tapped
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    live: Mutex<HashMap<u32, Notification>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a live notification, as a tap would
    pub fn take(&self, notification_id: u32) -> Option<Notification> {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&notification_id)
    }
}

impl Notifier for ConsoleNotifier {
    fn post(&self, notification_id: u32, notification: Notification) {
        println!("[{}] {}", notification.title, notification.body);
        let replaced = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(notification_id, notification);
        if replaced.is_some() {
            tracing::debug!(notification_id, "replaced live notification");
        }
    }
}

/// Prints toast messages to stderr
#[derive(Debug, Default)]
pub struct ConsoleFeedback;

impl Feedback for ConsoleFeedback {
    fn show(&self, message: &str) {
        eprintln!("» {message}");
    }
}
