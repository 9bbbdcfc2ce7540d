//! Clipboard sinks and the ranked chain that tries them in order.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use super::ClipboardSink;
use crate::error::{CalcError, CalcResult};

/// Clipboard tool fed through stdin (wl-copy, xclip, xsel)
pub struct CommandClipboard {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(name: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn wl_copy() -> Self {
        Self::new("wl-copy", "wl-copy", &[])
    }

    pub fn xclip() -> Self {
        Self::new("xclip", "xclip", &["-selection", "clipboard"])
    }

    pub fn xsel() -> Self {
        Self::new("xsel", "xsel", &["--clipboard", "--input"])
    }
}

impl ClipboardSink for CommandClipboard {
    fn name(&self) -> &str {
        &self.name
    }

    fn copy(&self, text: &str) -> CalcResult<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    CalcError::Clipboard(format!("{} is not installed", self.program))
                }
                _ => CalcError::Clipboard(format!("Failed to start {}: {}", self.program, e)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| CalcError::Clipboard(format!("Failed to write to clipboard: {}", e)))?;
        }

        let status = child
            .wait()
            .map_err(|e| CalcError::Clipboard(format!("Failed to wait for {}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(CalcError::Clipboard(format!("{} exited with {}", self.program, status)))
        }
    }
}

/// In-process clipboard using arboard
///
/// The handle is created on first use and kept for the life of the process,
/// since X11 clipboards are served by their owner.
pub struct ArboardClipboard {
    clipboard: Mutex<Option<arboard::Clipboard>>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self {
            clipboard: Mutex::new(None),
        }
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for ArboardClipboard {
    fn name(&self) -> &str {
        "arboard"
    }

    fn copy(&self, text: &str) -> CalcResult<()> {
        let mut guard = self
            .clipboard
            .lock()
            .map_err(|e| CalcError::Clipboard(e.to_string()))?;

        if guard.is_none() {
            *guard = Some(
                arboard::Clipboard::new().map_err(|e| CalcError::Clipboard(e.to_string()))?,
            );
        }

        match guard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| CalcError::Clipboard(e.to_string())),
            None => Err(CalcError::Clipboard("clipboard unavailable".to_string())),
        }
    }
}

/// Ranked list of sinks; the first one that succeeds wins.
pub struct ClipboardChain {
    sinks: Vec<Box<dyn ClipboardSink>>,
}

impl ClipboardChain {
    pub fn new(sinks: Vec<Box<dyn ClipboardSink>>) -> Self {
        Self { sinks }
    }

    /// Build a chain from sink names, skipping unknown ones.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let sinks = names
            .iter()
            .filter_map(|name| {
                let sink: Box<dyn ClipboardSink> = match name.as_ref() {
                    "wl-copy" => Box::new(CommandClipboard::wl_copy()),
                    "xclip" => Box::new(CommandClipboard::xclip()),
                    "xsel" => Box::new(CommandClipboard::xsel()),
                    "arboard" => Box::new(ArboardClipboard::new()),
                    other => {
                        tracing::warn!(sink = other, "unknown clipboard sink, skipping");
                        return None;
                    }
                };
                Some(sink)
            })
            .collect();

        Self::new(sinks)
    }

    pub fn names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl ClipboardSink for ClipboardChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn copy(&self, text: &str) -> CalcResult<()> {
        let mut failures = Vec::new();

        for sink in &self.sinks {
            match sink.copy(text) {
                Ok(()) => {
                    tracing::debug!(sink = sink.name(), "copied to clipboard");
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(sink = sink.name(), error = %e, "clipboard sink failed");
                    failures.push(format!("{}: {}", sink.name(), e));
                }
            }
        }

        if failures.is_empty() {
            return Err(CalcError::Clipboard("no clipboard sinks configured".to_string()));
        }
        Err(CalcError::Clipboard(failures.join("; ")))
    }
}
