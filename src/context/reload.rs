// ABOUTME: Deferred full-reload policy run after a tenant switch
// ABOUTME: ReloadScheduler trait with a no-op and a Tokio-timer implementation where newer switches supersede
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::TenantKey;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Schedules the full reload that drops every tenant-scoped cached value
///
/// The manager calls into the scheduler while holding its transition lock,
/// so implementations must defer the reload and never run it on the
/// caller's stack.
pub trait ReloadScheduler: Send + Sync {
    /// Reload into `tenant` after `delay`, replacing any reload still pending
    fn schedule(&self, tenant: &TenantKey, delay: Duration);

    /// Drop the pending reload, if any
    fn cancel(&self);
}

/// Work performed when a scheduled reload fires
pub trait ReloadHandler: Send + Sync {
    /// Drop tenant-scoped state and reload into `tenant`
    fn reload(&self, tenant: &TenantKey);
}

impl<F> ReloadHandler for F
where
    F: Fn(&TenantKey) + Send + Sync,
{
    fn reload(&self, tenant: &TenantKey) {
        self(tenant);
    }
}

/// Scheduler that never reloads
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReload;

impl ReloadScheduler for NoReload {
    fn schedule(&self, tenant: &TenantKey, delay: Duration) {
        debug!(%tenant, ?delay, "Reload requested but reloading is disabled");
    }

    fn cancel(&self) {}
}

/// Runs the handler on a Tokio timer; at most one reload is ever pending
///
/// Outside a runtime the delay runs on a short-lived thread instead. Every
/// schedule or cancel bumps a generation, and a thread whose generation is
/// no longer current skips its reload.
pub struct TokioReloadScheduler {
    handler: Arc<dyn ReloadHandler>,
    pending: Mutex<Option<JoinHandle<()>>>,
    generation: Arc<AtomicU64>,
}

impl TokioReloadScheduler {
    /// Scheduler running `handler` when a reload fires
    #[must_use]
    pub fn new(handler: Arc<dyn ReloadHandler>) -> Self {
        Self {
            handler,
            pending: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Whether a reload scheduled on the runtime has not fired yet
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    fn replace_pending(&self, task: Option<JoinHandle<()>>) {
        let previous = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *pending, task)
        };
        if let Some(previous) = previous {
            if !previous.is_finished() {
                debug!("Superseding pending reload");
            }
            previous.abort();
        }
    }
}

impl ReloadScheduler for TokioReloadScheduler {
    fn schedule(&self, tenant: &TenantKey, delay: Duration) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let handler = Arc::clone(&self.handler);
        let target = tenant.clone();

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let task = runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                info!(tenant = %target, "Reloading for tenant change");
                handler.reload(&target);
            });
            self.replace_pending(Some(task));
            return;
        }

        self.replace_pending(None);
        let current = Arc::clone(&self.generation);
        let spawned = std::thread::Builder::new()
            .name("tenant-reload".into())
            .spawn(move || {
                std::thread::sleep(delay);
                if current.load(Ordering::SeqCst) == generation {
                    info!(tenant = %target, "Reloading for tenant change");
                    handler.reload(&target);
                } else {
                    debug!(tenant = %target, "Reload superseded before it fired");
                }
            });
        if let Err(e) = spawned {
            warn!(%tenant, error = %e, "Cannot start reload thread, skipping reload");
        }
    }

    fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.replace_pending(None);
    }
}

impl Drop for TokioReloadScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting() -> (Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>, TokioReloadScheduler) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (c, s) = (Arc::clone(&count), Arc::clone(&seen));
        let scheduler = TokioReloadScheduler::new(Arc::new(move |tenant: &TenantKey| {
            c.fetch_add(1, Ordering::SeqCst);
            s.lock().unwrap().push(tenant.to_string());
        }));
        (count, seen, scheduler)
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_schedule_supersedes_pending_reload() {
        let (count, seen, scheduler) = counting();

        scheduler.schedule(&TenantKey::normalize("samsonite"), Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.schedule(&TenantKey::normalize("bunge"), Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap().as_slice(), ["bunge"]);
        assert!(!scheduler.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_reload() {
        let (count, _, scheduler) = counting();

        scheduler.schedule(&TenantKey::normalize("gcpl"), Duration::from_millis(100));
        assert!(scheduler.has_pending());
        scheduler.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reload_waits_for_delay_without_runtime() {
        let (count, seen, scheduler) = counting();

        scheduler.schedule(&TenantKey::normalize("bowlers"), Duration::from_millis(100));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        std::thread::sleep(Duration::from_millis(400));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap().as_slice(), ["bowlers"]);
    }

    #[test]
    fn test_newer_schedule_supersedes_without_runtime() {
        let (count, seen, scheduler) = counting();

        scheduler.schedule(&TenantKey::normalize("samsonite"), Duration::from_millis(50));
        scheduler.schedule(&TenantKey::normalize("bunge"), Duration::from_millis(50));
        std::thread::sleep(Duration::from_millis(400));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap().as_slice(), ["bunge"]);
    }

    #[test]
    fn test_cancel_drops_reload_without_runtime() {
        let (count, _, scheduler) = counting();

        scheduler.schedule(&TenantKey::normalize("gcpl"), Duration::from_millis(50));
        scheduler.cancel();
        std::thread::sleep(Duration::from_millis(300));

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
