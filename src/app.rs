//! The interaction loop: show the menu, classify the selection, dispatch.

use crate::config::Config;
use crate::error::CalcResult;
use crate::platform::{Platform, Selection, Urgency};
use crate::services::calculator;
use crate::services::history::{compose_entry, entry_result, HistoryStore};

/// First menu line; selecting it does nothing.
pub const INSTRUCTIONS: &str = "Type an expression, or pick a result to copy it";

/// Line between the instructions and the history.
pub const SEPARATOR: &str = "──────────── history ────────────";

/// How a line returned by the chooser is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Blank, instructions or separator
    Ignore,
    /// An existing history entry; copy its result again
    Replay { result: String },
    /// Anything else is a new expression
    Evaluate { expression: String },
}

/// What handling one selection did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Replayed { result: String, copied: bool },
    Calculated { entry: String, copied: bool },
    Invalid { expression: String },
}

pub struct App {
    history: HistoryStore,
    platform: Platform,
    prompt: String,
    visible: usize,
}

impl App {
    pub fn new(config: &Config, history: HistoryStore, platform: Platform) -> Self {
        Self {
            history,
            platform,
            prompt: config.chooser.prompt.clone(),
            visible: config.history.visible,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Menu body: instructions, then the separator and recent history when
    /// there is any.
    pub fn menu_lines(&self) -> Vec<String> {
        let mut lines = vec![INSTRUCTIONS.to_string()];
        if !self.history.is_empty() && self.visible > 0 {
            lines.push(SEPARATOR.to_string());
            lines.extend(self.history.recent(self.visible).map(String::from));
        }
        lines
    }

    /// Decide what a chooser line means. History matches win over
    /// evaluation, so a stored line is never re-evaluated.
    pub fn classify(&self, input: &str) -> Action {
        let input = input.trim();
        if input.is_empty() || input == INSTRUCTIONS || input == SEPARATOR {
            return Action::Ignore;
        }

        if self.history.contains(input) {
            if let Some(result) = entry_result(input) {
                return Action::Replay {
                    result: result.to_string(),
                };
            }
        }

        Action::Evaluate {
            expression: input.to_string(),
        }
    }

    /// Classify and act on one line from the chooser.
    pub fn handle(&mut self, input: &str) -> Outcome {
        match self.classify(input) {
            Action::Ignore => Outcome::Ignored,
            Action::Replay { result } => {
                let copied = self.copy(&result);
                Outcome::Replayed { result, copied }
            }
            Action::Evaluate { expression } => match calculator::calculate(&expression) {
                Some(result) => {
                    let entry = compose_entry(&expression, &result);
                    if self.history.append(entry.as_str()) {
                        tracing::info!(entry = %entry, "calculated");
                    }
                    let copied = self.copy(&result);
                    Outcome::Calculated { entry, copied }
                }
                None => {
                    self.notify(&format!("Invalid expression: {expression}"), Urgency::Critical);
                    Outcome::Invalid { expression }
                }
            },
        }
    }

    /// Run until the chooser is cancelled. Only chooser failures end the
    /// loop with an error.
    pub fn run(&mut self) -> CalcResult<()> {
        loop {
            let lines = self.menu_lines();
            match self.platform.chooser.choose(&self.prompt, &lines)? {
                Selection::Cancelled => {
                    tracing::debug!("chooser cancelled");
                    return Ok(());
                }
                Selection::Picked(text) => {
                    let outcome = self.handle(&text);
                    tracing::debug!(?outcome, "handled selection");
                }
            }
        }
    }

    /// Whether the chooser can be started at all.
    pub fn chooser_available(&self) -> bool {
        self.platform.chooser.is_available()
    }

    fn copy(&self, result: &str) -> bool {
        match self.platform.clipboard.copy(result) {
            Ok(()) => {
                self.notify(&format!("Copied: {result}"), Urgency::Normal);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.notify(&format!("Could not copy {result} to the clipboard"), Urgency::Critical);
                false
            }
        }
    }

    fn notify(&self, message: &str, urgency: Urgency) {
        if let Err(e) = self.platform.notifier.notify(message, urgency) {
            tracing::warn!(error = %e, "notification failed");
        }
    }
}
