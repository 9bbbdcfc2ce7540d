//! Calculation history: a bounded, deduplicated list of `expr = result` lines
//! persisted to a flat text file.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CalcResult;

/// Separator between the expression and the result in a history entry.
pub const ENTRY_SEPARATOR: &str = " = ";

/// Build the stored form of one calculation.
pub fn compose_entry(expression: &str, result: &str) -> String {
    format!("{expression}{ENTRY_SEPARATOR}{result}")
}

/// The result half of an entry, split on the first separator.
pub fn entry_result(entry: &str) -> Option<&str> {
    entry.split_once(ENTRY_SEPARATOR).map(|(_, result)| result)
}

/// Manages calculation history
///
/// Entries are kept oldest first. Appending an entry that is already present
/// is a no-op; appending past `capacity` evicts the oldest entry.
#[derive(Debug)]
pub struct HistoryStore {
    entries: VecDeque<String>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Create an empty history that is never written to disk.
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            path: None,
        }
    }

    /// Load history from `path`.
    ///
    /// Returns an empty history if the file doesn't exist or can't be read.
    /// Blank lines are skipped, repeated lines keep their first position and
    /// only the newest `capacity` entries survive.
    pub fn load(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let path = path.into();
        let mut store = Self::in_memory(capacity);

        match fs::read_to_string(&path) {
            Ok(contents) => {
                for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                    if !store.contains(line) {
                        store.entries.push_back(line.to_string());
                    }
                }
                store.evict();
                tracing::debug!(path = %path.display(), entries = store.len(), "loaded history");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read history");
            }
        }

        store.path = Some(path);
        store
    }

    /// Add an entry, persisting the history if it changed.
    ///
    /// Returns true if the entry was new.
    pub fn append(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.contains(&entry) {
            return false;
        }

        self.entries.push_back(entry);
        self.evict();
        self.persist();
        true
    }

    /// Remove every entry. Call [`save`](Self::save) to write the empty file.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Save history to disk, one entry per line.
    ///
    /// A store without a backing file saves nothing.
    pub fn save(&self) -> CalcResult<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut contents = String::new();
        for entry in &self.entries {
            contents.push_str(entry);
            contents.push('\n');
        }
        fs::write(path, contents)?;
        Ok(())
    }

    /// The last `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().take(n).map(String::as_str)
    }

    /// Whether `entry` is stored exactly as given.
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "failed to save history");
        }
    }
}
