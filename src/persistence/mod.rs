// ABOUTME: Persistence adapter for the selected tenant with cross-context change notifications
// ABOUTME: SelectionStore trait, storage events, and origin-filtered external change subscriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Selection Persistence
//!
//! The currently selected tenant lives in one key/value entry
//! (`selectedClient`) of a store shared by several execution contexts. Writes
//! are published on a broadcast bus tagged with the writer's [`ContextId`];
//! each context subscribes through [`ExternalChanges`], which drops its own
//! events so only writes made by *other* contexts are delivered.
//!
//! Delivery is at-least-once and best effort. Consumers deduplicate by
//! comparing the notified key with the key they already hold.

/// JSON file backed store shared between processes
pub mod file;
/// In-process store shared between contexts
pub mod memory;

pub use file::FileSelectionStore;
pub use memory::{MemorySelectionStore, SharedStorage};

use crate::constants::storage::SELECTED_CLIENT_KEY;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Identity of one execution context (tab, process) sharing a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(Uuid);

impl ContextId {
    /// Fresh random context identity
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Origin used for changes whose writer cannot be identified
    #[must_use]
    pub const fn unknown() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the [`Self::unknown`] origin
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Change to one entry of the shared store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEvent {
    /// Entry key
    pub key: String,
    /// New value; `None` when the entry was removed
    pub new_value: Option<String>,
    /// Context that made the change
    pub origin: ContextId,
}

/// Durable, context-shared persistence of the selected tenant key
pub trait SelectionStore: Send + Sync {
    /// Identity of the context this handle writes as
    fn context_id(&self) -> ContextId;

    /// Persisted tenant key, or `None` if nothing was ever selected
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` or `RESOURCE_UNAVAILABLE` when the store
    /// cannot be read.
    fn read_selected(&self) -> AppResult<Option<String>>;

    /// Persist `key`; other contexts observe the write
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` or `RESOURCE_UNAVAILABLE` when the store
    /// cannot be written.
    fn write_selected(&self, key: &str) -> AppResult<()>;

    /// Subscribe to selection changes made by other contexts
    fn subscribe_external(&self) -> ExternalChanges;
}

/// Receiver of selection changes made by other contexts
///
/// Events originating from `own` and events for other keys are skipped.
pub struct ExternalChanges {
    receiver: broadcast::Receiver<StorageEvent>,
    own: ContextId,
}

impl ExternalChanges {
    /// Wrap a bus receiver for the context `own`
    #[must_use]
    pub const fn new(receiver: broadcast::Receiver<StorageEvent>, own: ContextId) -> Self {
        Self { receiver, own }
    }

    fn accepts(&self, event: &StorageEvent) -> bool {
        event.key == SELECTED_CLIENT_KEY && event.origin != self.own
    }

    /// Wait for the next external selection change; `None` once the bus is closed
    pub async fn recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Selection change subscriber lagged; older changes dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-delivered external change, without waiting
    pub fn try_recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Selection change subscriber lagged; older changes dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

/// Background listener registered with [`on_external_change`]
///
/// Dropping the handle detaches the listener.
#[derive(Debug)]
pub struct ListenerHandle {
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Stop delivering notifications
    pub fn detach(self) {
        self.task.abort();
    }

    /// Whether the listener task has ended
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Invoke `callback` for every selection change made by another context
///
/// # Errors
///
/// Returns `INTERNAL_ERROR` when called outside a Tokio runtime.
pub fn on_external_change<F>(store: &Arc<dyn SelectionStore>, callback: F) -> AppResult<ListenerHandle>
where
    F: Fn(StorageEvent) + Send + 'static,
{
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| AppError::internal("selection listener requires a Tokio runtime").with_source(e))?;
    let mut changes = store.subscribe_external();
    let context = store.context_id();
    let task = runtime.spawn(async move {
        while let Some(event) = changes.recv().await {
            callback(event);
        }
        debug!(%context, "Selection change bus closed, listener exiting");
    });
    Ok(ListenerHandle { task })
}
