// ABOUTME: JSON file backed selection store shared between processes
// ABOUTME: Atomic writes plus a polling watcher that reports changes made by other processes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ContextId, ExternalChanges, SelectionStore, StorageEvent};
use crate::constants::storage::{
    DATA_DIR_NAME, EVENT_CHANNEL_CAPACITY, SELECTED_CLIENT_KEY, SELECTION_FILE_NAME,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Selection store persisted as a JSON object on disk
///
/// The document is a JSON object (`{"selectedClient": "bunge"}`), so the file
/// can hold other shell entries next to the selection. A selection that is not
/// a string reads as nothing selected, and a write replaces a document that no
/// longer parses instead of refusing to switch. Other processes
/// sharing the file are detected by [`Self::spawn_watcher`], which compares the
/// value on disk with the last value this context wrote or observed; this
/// context's own writes therefore never come back as external changes.
#[derive(Debug)]
pub struct FileSelectionStore {
    path: PathBuf,
    context: ContextId,
    events: broadcast::Sender<StorageEvent>,
    last_seen: Mutex<Option<String>>,
}

impl FileSelectionStore {
    /// Open (without creating) the store at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let last_seen = read_document(&path)
            .map(|document| selected_in(&path, document))
            .unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Cannot read selection file at open");
                None
            });
        Self {
            path,
            context: ContextId::new(),
            events,
            last_seen: Mutex::new(last_seen),
        }
    }

    /// Platform default location (`<data dir>/dashboard-shell/selection.json`)
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` when the platform has no data directory.
    pub fn default_path() -> AppResult<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME).join(SELECTION_FILE_NAME))
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ConfigMissing,
                    "no platform data directory for the selection file",
                )
            })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn remember(&self, value: Option<String>) -> Option<String> {
        let mut last_seen = self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *last_seen, value)
    }

    /// Compare the file with the last known value and publish a change if it moved
    ///
    /// Returns whether a change was published.
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` or `SERIALIZATION_ERROR` when the file cannot
    /// be read or parsed.
    pub fn poll_once(&self) -> AppResult<bool> {
        let current = selected_in(&self.path, read_document(&self.path)?);
        let previous = self.remember(current.clone());
        if previous == current {
            return Ok(false);
        }

        debug!(path = %self.path.display(), ?previous, ?current, "Selection file changed on disk");
        if self
            .events
            .send(StorageEvent {
                key: SELECTED_CLIENT_KEY.to_owned(),
                new_value: current,
                origin: ContextId::unknown(),
            })
            .is_err()
        {
            debug!("Selection file change detected with no subscribers");
        }
        Ok(true)
    }

    /// Poll the file every `interval` until the returned task is aborted
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` when called outside a Tokio runtime.
    pub fn spawn_watcher(self: &Arc<Self>, interval: Duration) -> AppResult<JoinHandle<()>> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            AppError::internal("selection file watcher requires a Tokio runtime").with_source(e)
        })?;
        let store = Arc::clone(self);
        info!(path = %store.path.display(), ?interval, "Watching selection file for external changes");
        Ok(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if let Err(e) = store.poll_once() {
                    warn!(error = %e, "Selection file poll failed");
                }
            }
        }))
    }
}

impl SelectionStore for FileSelectionStore {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn read_selected(&self) -> AppResult<Option<String>> {
        Ok(selected_in(&self.path, read_document(&self.path)?))
    }

    fn write_selected(&self, key: &str) -> AppResult<()> {
        let mut document = match read_document(&self.path) {
            Ok(document) => document,
            Err(e) if e.code == ErrorCode::SerializationError => {
                warn!(path = %self.path.display(), error = %e, "Replacing unreadable selection file");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        document.insert(SELECTED_CLIENT_KEY.to_owned(), Value::String(key.to_owned()));
        write_document(&self.path, &document)?;
        self.remember(Some(key.to_owned()));
        Ok(())
    }

    fn subscribe_external(&self) -> ExternalChanges {
        ExternalChanges::new(self.events.subscribe(), self.context)
    }
}

fn selected_in(path: &Path, mut document: Map<String, Value>) -> Option<String> {
    match document.remove(SELECTED_CLIENT_KEY)? {
        Value::String(key) => Some(key),
        other => {
            warn!(path = %path.display(), value = %other, "Selection is not a string, ignoring it");
            None
        }
    }
}

fn read_document(path: &Path) -> AppResult<Map<String, Value>> {
    match std::fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(Map::new()),
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
        Err(e) => Err(AppError::storage(format!(
            "cannot read selection file {}",
            path.display()
        ))
        .with_source(e)),
    }
}

fn write_document(path: &Path, document: &Map<String, Value>) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(document)?;
    // Write then rename so readers never observe a half-written document
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, contents).map_err(|e| {
        AppError::storage(format!("cannot write selection file {}", staging.display()))
            .with_source(e)
    })?;
    std::fs::rename(&staging, path).map_err(|e| {
        AppError::storage(format!("cannot replace selection file {}", path.display()))
            .with_source(e)
    })?;
    Ok(())
}
