//! Platform abstraction layer.
//!
//! The interaction loop only talks to the traits defined here; the
//! process-backed implementations live in the submodules and are wired
//! together by [`Platform::from_config`].

mod chooser;
mod clipboard;
mod notify;

pub use chooser::CommandChooser;
pub use clipboard::{ArboardClipboard, ClipboardChain, CommandClipboard};
pub use notify::{ConsoleNotifier, DesktopNotifier, FallbackNotifier, SilentNotifier};

use crate::config::Config;
use crate::error::CalcResult;

/// What the user did with the chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A listed line was picked or new text was typed
    Picked(String),
    /// The chooser was dismissed (Escape)
    Cancelled,
}

/// Notification urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Critical,
}

/// Prompt the user with a list of lines and return their selection.
pub trait Chooser {
    fn choose(&self, prompt: &str, lines: &[String]) -> CalcResult<Selection>;

    /// Whether the chooser can run at all; checked once at startup.
    fn is_available(&self) -> bool {
        true
    }
}

/// Place text on the system clipboard.
pub trait ClipboardSink {
    /// Short name for logs
    fn name(&self) -> &str;
    fn copy(&self, text: &str) -> CalcResult<()>;
}

/// Show desktop notifications
pub trait Notifier {
    fn notify(&self, message: &str, urgency: Urgency) -> CalcResult<()>;
}

/// Aggregate struct holding the collaborator implementations
pub struct Platform {
    pub chooser: Box<dyn Chooser>,
    pub clipboard: Box<dyn ClipboardSink>,
    pub notifier: Box<dyn Notifier>,
}

impl Platform {
    /// Build the process-backed collaborators described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let notifier: Box<dyn Notifier> = if config.notifications.enabled {
            Box::new(FallbackNotifier::new(
                Box::new(DesktopNotifier::new(config.notifications.timeout_ms)),
                Box::new(ConsoleNotifier),
            ))
        } else {
            Box::new(SilentNotifier)
        };

        Self {
            chooser: Box::new(CommandChooser::new(&config.chooser)),
            clipboard: Box::new(ClipboardChain::from_names(&config.clipboard.order)),
            notifier,
        }
    }
}
