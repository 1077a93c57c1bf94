// ABOUTME: In-process key/value store shared by several execution contexts
// ABOUTME: Publishes every write on a broadcast bus; can be switched unavailable for failure testing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ContextId, ExternalChanges, SelectionStore, StorageEvent};
use crate::constants::storage::{EVENT_CHANNEL_CAPACITY, SELECTED_CLIENT_KEY};
use crate::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

/// Key/value store shared by every context opened on it
///
/// Plays the role of browser local storage: one map, many tabs. Each write is
/// broadcast to all contexts, tagged with the writer's identity.
#[derive(Debug)]
pub struct SharedStorage {
    entries: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
    available: AtomicBool,
}

impl SharedStorage {
    /// Create an empty shared store
    #[must_use]
    pub fn new() -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            entries: RwLock::new(HashMap::new()),
            events,
            available: AtomicBool::new(true),
        })
    }

    /// Open a new execution context on this store
    #[must_use]
    pub fn open_context(self: &Arc<Self>) -> MemorySelectionStore {
        MemorySelectionStore {
            storage: Arc::clone(self),
            context: ContextId::new(),
        }
    }

    /// Make every subsequent read and write fail (`false`) or succeed again (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::unavailable("shared storage is unavailable"))
        }
    }

    /// Read one entry
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_UNAVAILABLE` when the store is disabled and
    /// `INTERNAL_ERROR` when the lock is poisoned.
    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.ensure_available()?;
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::internal("shared storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    /// Write one entry and broadcast the change as made by `origin`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_UNAVAILABLE` when the store is disabled and
    /// `INTERNAL_ERROR` when the lock is poisoned.
    pub fn set(&self, key: &str, value: &str, origin: ContextId) -> AppResult<()> {
        self.ensure_available()?;
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| AppError::internal("shared storage lock poisoned"))?;
            entries.insert(key.to_owned(), value.to_owned());
        }
        self.publish(StorageEvent {
            key: key.to_owned(),
            new_value: Some(value.to_owned()),
            origin,
        });
        Ok(())
    }

    /// Remove one entry and broadcast the removal as made by `origin`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_UNAVAILABLE` when the store is disabled and
    /// `INTERNAL_ERROR` when the lock is poisoned.
    pub fn remove(&self, key: &str, origin: ContextId) -> AppResult<()> {
        self.ensure_available()?;
        let removed = self
            .entries
            .write()
            .map_err(|_| AppError::internal("shared storage lock poisoned"))?
            .remove(key);
        if removed.is_some() {
            self.publish(StorageEvent {
                key: key.to_owned(),
                new_value: None,
                origin,
            });
        }
        Ok(())
    }

    fn publish(&self, event: StorageEvent) {
        // No receivers is fine: nobody else has the store open
        if self.events.send(event).is_err() {
            debug!("Storage change published with no subscribers");
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}

/// One context's handle on a [`SharedStorage`]
#[derive(Debug, Clone)]
pub struct MemorySelectionStore {
    storage: Arc<SharedStorage>,
    context: ContextId,
}

impl MemorySelectionStore {
    /// Store shared by this context
    #[must_use]
    pub const fn storage(&self) -> &Arc<SharedStorage> {
        &self.storage
    }
}

impl SelectionStore for MemorySelectionStore {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn read_selected(&self) -> AppResult<Option<String>> {
        self.storage.get(SELECTED_CLIENT_KEY)
    }

    fn write_selected(&self, key: &str) -> AppResult<()> {
        self.storage.set(SELECTED_CLIENT_KEY, key, self.context)
    }

    fn subscribe_external(&self) -> ExternalChanges {
        ExternalChanges::new(self.storage.subscribe(), self.context)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_share_values() {
        let storage = SharedStorage::new();
        let first = storage.open_context();
        let second = storage.open_context();

        assert_eq!(first.read_selected().unwrap(), None);
        first.write_selected("bunge").unwrap();
        assert_eq!(second.read_selected().unwrap().as_deref(), Some("bunge"));
    }

    #[test]
    fn test_own_writes_are_not_external() {
        let storage = SharedStorage::new();
        let first = storage.open_context();
        let second = storage.open_context();
        let mut first_changes = first.subscribe_external();
        let mut second_changes = second.subscribe_external();

        first.write_selected("samsonite").unwrap();

        assert!(first_changes.try_recv().is_none());
        let event = second_changes.try_recv().unwrap();
        assert_eq!(event.new_value.as_deref(), Some("samsonite"));
        assert_eq!(event.origin, first.context_id());
    }

    #[test]
    fn test_unavailable_storage_fails_reads_and_writes() {
        let storage = SharedStorage::new();
        let context = storage.open_context();
        storage.set_available(false);

        assert!(context.read_selected().is_err());
        assert!(context.write_selected("gcpl").is_err());

        storage.set_available(true);
        assert!(context.write_selected("gcpl").is_ok());
    }

    #[test]
    fn test_other_keys_are_filtered() {
        let storage = SharedStorage::new();
        let first = storage.open_context();
        let second = storage.open_context();
        let mut changes = second.subscribe_external();

        storage.set("accessToken", "abc", first.context_id()).unwrap();
        assert!(changes.try_recv().is_none());
    }
}
