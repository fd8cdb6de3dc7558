//! File watcher for development mode.
//!
//! This module provides file system watching functionality to regenerate
//! `Codable` code when Swift sources change. Events are debounced on the
//! watcher's own thread and delivered over a channel.

use crate::error::{CliResult, WatchError};
use crate::scanner::SWIFT_EXTENSION;
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;
use tracing::trace;

/// Event types for file changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A file was created or modified.
    Modified(PathBuf),
    /// A file was deleted.
    Deleted(PathBuf),
    /// An error occurred.
    Error(String),
}

/// File watcher for monitoring Swift source files.
pub struct FileWatcher {
    /// File or directory to watch.
    root: PathBuf,
    /// Debounce duration in milliseconds.
    debounce_ms: u64,
    /// Stem suffix of generated files, whose changes are ignored.
    generated_suffix: Option<String>,
}

impl FileWatcher {
    /// Create a new file watcher for the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce_ms: 500,
            generated_suffix: None,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Ignore changes to files whose stem ends with `suffix`.
    pub fn ignore_generated(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.generated_suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }

    /// Start watching for file changes.
    ///
    /// The returned debouncer must be kept alive for events to flow.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();
        let generated_suffix = self.generated_suffix.clone();

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        let path = event.path;
                        if !is_watched_source(&path, generated_suffix.as_deref()) {
                            trace!(path = %path.display(), "Ignoring change");
                            continue;
                        }

                        let watch_event = if path.exists() {
                            WatchEvent::Modified(path)
                        } else {
                            WatchEvent::Deleted(path)
                        };

                        let _ = tx.send(watch_event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Notify(e.to_string()))?;

        Ok((debouncer, rx))
    }

    /// Get the path being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Whether a change to `path` should trigger regeneration.
fn is_watched_source(path: &Path, generated_suffix: Option<&str>) -> bool {
    if path.extension().map_or(true, |ext| ext != SWIFT_EXTENSION) {
        return false;
    }
    match (generated_suffix, path.file_stem()) {
        (Some(suffix), Some(stem)) => !stem.to_string_lossy().ends_with(suffix),
        _ => true,
    }
}

impl WatchEvent {
    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    /// Get the error message if this is an error event.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
