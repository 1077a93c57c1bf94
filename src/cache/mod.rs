// ABOUTME: Bounded LRU cache whose entries are scoped to the tenant and epoch they were stored under
// ABOUTME: Values cached for a previous tenant are never returned after a switch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::context::CacheScope;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

struct ScopedEntry<V> {
    scope: CacheScope,
    value: V,
    stored_at: Instant,
}

/// Tenant-scoped response cache
///
/// Each entry remembers the [`CacheScope`] current when it was stored. A
/// lookup under any other scope (different tenant, or the same tenant after a
/// later change) misses and evicts the entry, so data fetched for one tenant
/// cannot leak into another.
pub struct TenantScopedCache<V> {
    entries: Mutex<LruCache<String, ScopedEntry<V>>>,
    ttl: Option<Duration>,
}

impl<V: Clone> TenantScopedCache<V> {
    /// Capacity used when zero is requested
    const DEFAULT_CAPACITY: usize = 256;

    /// Cache holding at most `capacity` entries, without expiry
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or_else(|| NonZeroUsize::new(Self::DEFAULT_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl: None,
        }
    }

    /// Also expire entries `ttl` after they were stored
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, ScopedEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &ScopedEntry<V>, scope: &CacheScope) -> bool {
        entry.scope == *scope
            && !matches!(self.ttl, Some(ttl) if entry.stored_at.elapsed() >= ttl)
    }

    /// Value stored under `key` for `scope`
    pub fn get(&self, scope: &CacheScope, key: &str) -> Option<V> {
        let mut entries = self.lock();
        let fresh = entries.peek(key).map(|entry| self.is_fresh(entry, scope))?;
        if fresh {
            return entries.get(key).map(|entry| entry.value.clone());
        }
        entries.pop(key);
        drop(entries);
        debug!(key, tenant = %scope.tenant, epoch = scope.epoch, "Evicted out-of-scope cache entry");
        None
    }

    /// Store `value` under `key` for `scope`
    pub fn insert(&self, scope: CacheScope, key: impl Into<String>, value: V) {
        self.lock().push(
            key.into(),
            ScopedEntry {
                scope,
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop `key` whatever scope it was stored under
    pub fn invalidate(&self, key: &str) {
        self.lock().pop(key);
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        self.lock().clear();
    }

    /// Drop every entry not stored under `current`; returns how many were removed
    pub fn purge_stale(&self, current: &CacheScope) -> usize {
        let mut entries = self.lock();
        let stale: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| !self.is_fresh(entry, current))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        drop(entries);
        if !stale.is_empty() {
            debug!(removed = stale.len(), tenant = %current.tenant, "Purged stale tenant cache entries");
        }
        stale.len()
    }

    /// Number of entries, stale ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
