use super::{Notifier, Urgency};
use crate::error::{CalcError, CalcResult};

const APP_NAME: &str = "quickcalc";

/// Desktop notifications using notify-rust
pub struct DesktopNotifier {
    timeout_ms: u32,
}

impl DesktopNotifier {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str, urgency: Urgency) -> CalcResult<()> {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(APP_NAME)
            .summary("Calculator")
            .body(message)
            .timeout(notify_rust::Timeout::Milliseconds(self.timeout_ms));

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(match urgency {
            Urgency::Normal => notify_rust::Urgency::Normal,
            Urgency::Critical => notify_rust::Urgency::Critical,
        });
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        let _ = urgency;

        notification
            .show()
            .map_err(|e| CalcError::Notify(e.to_string()))?;
        Ok(())
    }
}

/// Echo notifications to stderr
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, urgency: Urgency) -> CalcResult<()> {
        match urgency {
            Urgency::Normal => eprintln!("[{APP_NAME}] {message}"),
            Urgency::Critical => eprintln!("[{APP_NAME}] error: {message}"),
        }
        Ok(())
    }
}

/// Drops every notification (notifications disabled in config)
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str, _urgency: Urgency) -> CalcResult<()> {
        Ok(())
    }
}

/// Try `primary`, falling back to `fallback` when it fails.
pub struct FallbackNotifier {
    primary: Box<dyn Notifier>,
    fallback: Box<dyn Notifier>,
}

impl FallbackNotifier {
    pub fn new(primary: Box<dyn Notifier>, fallback: Box<dyn Notifier>) -> Self {
        Self { primary, fallback }
    }
}

impl Notifier for FallbackNotifier {
    fn notify(&self, message: &str, urgency: Urgency) -> CalcResult<()> {
        self.primary.notify(message, urgency).or_else(|e| {
            tracing::debug!(error = %e, "desktop notification failed, falling back");
            self.fallback.notify(message, urgency)
        })
    }
}
