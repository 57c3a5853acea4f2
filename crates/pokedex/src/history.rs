//! Recent-search history.
//!
//! A most-recent-first list of creature names, bounded and free of
//! duplicates, persisted as a JSON array. Missing or unreadable files load as
//! an empty history.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Default file name when no data directory is available
pub const HISTORY_FILE_NAME: &str = "history.json";

pub const DEFAULT_HISTORY_MAX_ENTRIES: usize = 10;

#[derive(Debug)]
enum State {
    Unloaded,
    Loaded(Vec<String>),
}

/// Bounded, de-duplicated history backed by a JSON file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
    state: State,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
            state: State::Unloaded,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Current entries, most recent first. Empty until loaded.
    pub fn entries(&self) -> &[String] {
        match &self.state {
            State::Loaded(entries) => entries,
            State::Unloaded => &[],
        }
    }

    /// Read the persisted list. Never fails: a missing or malformed file
    /// yields an empty history.
    pub fn load(&mut self) -> &[String] {
        let entries = match read_entries(&self.path) {
            Some(entries) => normalize(entries, self.max_entries),
            None => Vec::new(),
        };
        tracing::debug!("Loaded {} history entries from {:?}", entries.len(), self.path);
        self.state = State::Loaded(entries);
        self.entries()
    }

    /// Put `name` at the front and persist the list.
    ///
    /// Returns `Ok(false)` without touching the file when `name` is already
    /// present. On a write error the in-memory list is left unchanged.
    pub fn record(&mut self, name: &str) -> Result<bool> {
        if !self.is_loaded() {
            self.load();
        }

        let current = self.entries();
        if current.iter().any(|entry| entry == name) {
            return Ok(false);
        }

        let mut next = Vec::with_capacity(current.len() + 1);
        next.push(name.to_string());
        next.extend(current.iter().cloned());
        next.truncate(self.max_entries);

        write_entries(&self.path, &next)?;
        self.state = State::Loaded(next);
        Ok(true)
    }
}

fn read_entries(path: &Path) -> Option<Vec<String>> {
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!("Ignoring malformed history file {:?}: {}", path, e);
            None
        }
    }
}

fn write_entries(path: &Path, entries: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string(entries)?)?;
    Ok(())
}

/// Drop duplicates (first occurrence wins) and cap the length.
fn normalize(entries: Vec<String>, max_entries: usize) -> Vec<String> {
    let mut seen = Vec::with_capacity(entries.len().min(max_entries));
    for entry in entries {
        if seen.len() == max_entries {
            break;
        }
        if !seen.contains(&entry) {
            seen.push(entry);
        }
    }
    seen
}
