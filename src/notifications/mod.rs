use notify_rust::{Notification, Urgency};

const APP_NAME: &str = "NAS Monitor Configuration";

/// Desktop notification manager
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Outcome of a successful action
    pub fn status(&self, message: &str) {
        self.send(message, Urgency::Normal);
    }

    /// Outcome of a failed action
    pub fn error(&self, message: &str) {
        self.send(message, Urgency::Critical);
    }

    fn send(&self, message: &str, urgency: Urgency) {
        if !self.enabled {
            return;
        }

        // Only the first line; troubleshooting hints stay on the terminal
        let body = message.lines().next().unwrap_or_default();
        if let Err(e) = Notification::new()
            .appname(APP_NAME)
            .summary(APP_NAME)
            .body(body)
            .urgency(urgency)
            .show()
        {
            tracing::warn!("Failed to show notification: {e}");
        }
    }
}
