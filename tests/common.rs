// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, context manager fixtures, failing stores and recording sinks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `dashboard_shell`

use dashboard_shell::context::{
    BrandingSink, BrandingUpdate, ContextOptions, ReloadScheduler, TenantContextManager,
};
use dashboard_shell::errors::{AppError, AppResult};
use dashboard_shell::models::TenantKey;
use dashboard_shell::persistence::{
    ContextId, ExternalChanges, MemorySelectionStore, SelectionStore, SharedStorage,
};
use dashboard_shell::tenant::TenantRegistry;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Memory store that counts writes and can be made to fail
pub struct FlakyStore {
    inner: MemorySelectionStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: MemorySelectionStore) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SelectionStore for FlakyStore {
    fn context_id(&self) -> ContextId {
        self.inner.context_id()
    }

    fn read_selected(&self) -> AppResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::storage("read refused"));
        }
        self.inner.read_selected()
    }

    fn write_selected(&self, key: &str) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage("quota exceeded"));
        }
        self.inner.write_selected(key)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn subscribe_external(&self) -> ExternalChanges {
        self.inner.subscribe_external()
    }
}

/// Branding sink remembering every update
#[derive(Default)]
pub struct RecordingBranding {
    updates: Mutex<Vec<BrandingUpdate>>,
}

impl RecordingBranding {
    pub fn titles(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|update| update.title.clone())
            .collect()
    }
}

impl BrandingSink for RecordingBranding {
    fn apply(&self, update: &BrandingUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }
}

/// Reload scheduler remembering requests instead of reloading
#[derive(Default)]
pub struct RecordingReload {
    scheduled: Mutex<Vec<(TenantKey, Duration)>>,
    cancels: AtomicUsize,
}

impl RecordingReload {
    pub fn scheduled(&self) -> Vec<(TenantKey, Duration)> {
        self.scheduled.lock().unwrap().clone()
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl ReloadScheduler for RecordingReload {
    fn schedule(&self, tenant: &TenantKey, delay: Duration) {
        self.scheduled.lock().unwrap().push((tenant.clone(), delay));
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

/// One execution context wired with recording collaborators
pub struct TestContext {
    pub store: Arc<FlakyStore>,
    pub branding: Arc<RecordingBranding>,
    pub reload: Arc<RecordingReload>,
    pub manager: Arc<TenantContextManager>,
}

/// Open a new context on `storage` with built-in tenants
pub fn open_context(storage: &Arc<SharedStorage>, options: ContextOptions) -> TestContext {
    init_test_logging();
    let store = Arc::new(FlakyStore::new(storage.open_context()));
    let branding = Arc::new(RecordingBranding::default());
    let reload = Arc::new(RecordingReload::default());
    let manager = Arc::new(
        TenantContextManager::builder(
            Arc::new(TenantRegistry::builtin()),
            Arc::clone(&store) as Arc<dyn SelectionStore>,
        )
        .with_branding(Arc::clone(&branding) as Arc<dyn BrandingSink>)
        .with_reload_scheduler(Arc::clone(&reload) as Arc<dyn ReloadScheduler>)
        .with_options(options)
        .build(),
    );
    TestContext {
        store,
        branding,
        reload,
        manager,
    }
}

/// Single context on fresh storage with default options
pub fn single_context() -> (Arc<SharedStorage>, TestContext) {
    let storage = SharedStorage::new();
    let context = open_context(&storage, ContextOptions::default());
    (storage, context)
}
