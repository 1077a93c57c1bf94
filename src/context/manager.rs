// ABOUTME: Tenant context manager owning the active tenant, its transitions and notifications
// ABOUTME: Switch, external change and refresh transitions published over watch and broadcast channels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::branding::{BrandingSink, BrandingUpdate, TracingBrandingSink};
use super::events::{ChangeSource, TenantChanged};
use super::reload::{NoReload, ReloadScheduler};
use super::state::ActiveTenantState;
use crate::constants::switching::{CHANGE_CHANNEL_CAPACITY, DEFAULT_RELOAD_DELAY_MS};
use crate::errors::AppResult;
use crate::models::{TenantConfig, TenantKey};
use crate::persistence::{on_external_change, ListenerHandle, SelectionStore};
use crate::tenant::{TenantOption, TenantRegistry};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Tunables of the context manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    /// Delay between a switch and the full reload it schedules
    pub reload_delay: Duration,
    /// Also reload when another context changes the selection
    pub reload_on_external_change: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            reload_delay: Duration::from_millis(DEFAULT_RELOAD_DELAY_MS),
            reload_on_external_change: false,
        }
    }
}

/// Per-call switch options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchOptions {
    /// Schedule a full reload once the switch is published
    pub force_reload: bool,
}

impl SwitchOptions {
    /// Switch in place, leaving cache invalidation to the tenant epoch
    #[must_use]
    pub const fn without_reload() -> Self {
        Self {
            force_reload: false,
        }
    }
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self { force_reload: true }
    }
}

/// Result of [`TenantContextManager::switch`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwitchOutcome {
    /// Active tenant moved from `from` to `to`
    Switched {
        /// Previously active tenant
        from: TenantKey,
        /// Newly active tenant
        to: TenantKey,
    },
    /// Requested tenant was already active; nothing was written
    Unchanged {
        /// Tenant that stays active
        key: TenantKey,
    },
    /// Persistence failed; the active tenant is unchanged and `message` is in `last_error`
    Failed {
        /// Tenant that could not be activated
        target: TenantKey,
        /// User-facing failure message
        message: String,
    },
}

impl SwitchOutcome {
    /// Whether the active tenant changed
    #[must_use]
    pub const fn is_switched(&self) -> bool {
        matches!(self, Self::Switched { .. })
    }

    /// Whether the switch failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Owner of the active tenant for one execution context
///
/// Every transition runs under one lock, so concurrent switches are applied
/// in order and the last one wins. State is published through a
/// `tokio::sync::watch` channel before the transition returns, then a
/// [`TenantChanged`] event is broadcast. Switch failures never escape as
/// errors: they are reported through [`SwitchOutcome::Failed`] and
/// `last_error`.
pub struct TenantContextManager {
    registry: Arc<TenantRegistry>,
    store: Arc<dyn SelectionStore>,
    branding: Arc<dyn BrandingSink>,
    reload: Arc<dyn ReloadScheduler>,
    options: ContextOptions,
    state: watch::Sender<ActiveTenantState>,
    changes: broadcast::Sender<TenantChanged>,
    transition: Mutex<()>,
    listener: Mutex<Option<ListenerHandle>>,
}

impl TenantContextManager {
    /// Start building a manager over `registry` persisting through `store`
    #[must_use]
    pub fn builder(
        registry: Arc<TenantRegistry>,
        store: Arc<dyn SelectionStore>,
    ) -> TenantContextManagerBuilder {
        TenantContextManagerBuilder::new(registry, store)
    }

    fn initial_state(registry: &TenantRegistry, store: &dyn SelectionStore) -> ActiveTenantState {
        let key = match store.read_selected() {
            Ok(Some(persisted)) if registry.is_registered(&persisted) => {
                TenantKey::normalize(&persisted)
            }
            Ok(Some(persisted)) => {
                warn!(
                    persisted = %persisted,
                    fallback = %registry.default_key(),
                    "Persisted tenant is not registered, starting on default"
                );
                registry.default_key().clone()
            }
            Ok(None) => registry.default_key().clone(),
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %registry.default_key(),
                    "Cannot read persisted tenant, starting on default"
                );
                registry.default_key().clone()
            }
        };
        let config = registry.lookup(key.as_str());
        ActiveTenantState::settled(key, config)
    }

    fn lock_transition(&self) -> std::sync::MutexGuard<'_, ()> {
        self.transition.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make `requested` the active tenant
    ///
    /// Unknown keys resolve to the default tenant. Switching to the active
    /// tenant is a no-op and writes nothing.
    pub fn switch(&self, requested: &str, options: SwitchOptions) -> SwitchOutcome {
        let _transition = self.lock_transition();
        let target = self.registry.resolve_key(requested);
        let from = self.current_key();
        if target == from {
            debug!(tenant = %target, "Switch requested to the active tenant, nothing to do");
            return SwitchOutcome::Unchanged { key: from };
        }

        self.state.send_modify(|state| state.begin_switch(target.clone()));

        if let Err(e) = self.store.write_selected(target.as_str()) {
            let message = format!("Failed to switch to {}: {e}", requested.trim());
            warn!(from = %from, to = %target, error = %e, "Tenant switch failed, keeping active tenant");
            self.state.send_modify(|state| state.fail(message.clone()));
            return SwitchOutcome::Failed { target, message };
        }

        let config = self.registry.lookup(target.as_str());
        self.branding.apply(&BrandingUpdate::from(config.as_ref()));
        let epoch = self.publish(target.clone(), config, ChangeSource::Switch);
        self.settle_reload(&target, options.force_reload);

        info!(from = %from, to = %target, epoch, "Switched tenant");
        SwitchOutcome::Switched { from, to: target }
    }

    /// Adopt a selection made by another context
    ///
    /// `None` (entry removed) means the default tenant. Nothing is persisted.
    /// Returns whether the active tenant changed.
    pub fn apply_external_change(&self, new_value: Option<&str>) -> bool {
        let _transition = self.lock_transition();
        let target = new_value.map_or_else(
            || self.registry.default_key().clone(),
            |value| self.registry.resolve_key(value),
        );
        self.adopt(target, ChangeSource::External, self.options.reload_on_external_change)
    }

    /// Re-read the persisted selection and adopt it if it moved
    ///
    /// Returns whether the active tenant changed. A read failure leaves the
    /// state untouched.
    pub fn refresh(&self) -> bool {
        let _transition = self.lock_transition();
        let target = match self.store.read_selected() {
            Ok(Some(persisted)) => self.registry.resolve_key(&persisted),
            Ok(None) => self.registry.default_key().clone(),
            Err(e) => {
                warn!(error = %e, "Cannot re-read persisted tenant");
                return false;
            }
        };
        self.adopt(target, ChangeSource::Refresh, false)
    }

    fn adopt(&self, target: TenantKey, source: ChangeSource, reload: bool) -> bool {
        let from = self.current_key();
        if target == from {
            debug!(tenant = %target, %source, "Tenant change already applied");
            return false;
        }

        let config = self.registry.lookup(target.as_str());
        self.branding.apply(&BrandingUpdate::from(config.as_ref()));
        let epoch = self.publish(target.clone(), config, source);
        self.settle_reload(&target, reload);

        info!(from = %from, to = %target, %source, epoch, "Adopted tenant change");
        true
    }

    fn publish(&self, key: TenantKey, config: Arc<TenantConfig>, source: ChangeSource) -> u64 {
        let mut epoch = 0;
        self.state.send_modify(|state| {
            state.commit(key.clone(), Arc::clone(&config));
            epoch = state.epoch();
        });
        let event = TenantChanged {
            client: key,
            config,
            source,
            epoch,
        };
        if self.changes.send(event).is_err() {
            debug!("Tenant change published with no subscribers");
        }
        epoch
    }

    fn settle_reload(&self, tenant: &TenantKey, reload: bool) {
        if reload {
            self.reload.schedule(tenant, self.options.reload_delay);
        } else {
            // A reload still pending would land on the previous tenant
            self.reload.cancel();
        }
    }

    /// Forget the last switch failure
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| {
            if state.last_error().is_some() {
                state.set_error(None);
                true
            } else {
                false
            }
        });
    }

    /// Follow selections made by other contexts sharing the store
    ///
    /// Replaces a listener started earlier. The listener only holds a weak
    /// reference, so it ends once the manager is dropped.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` when called outside a Tokio runtime.
    pub fn spawn_external_listener(self: &Arc<Self>) -> AppResult<()> {
        let manager = Arc::downgrade(self);
        let handle = on_external_change(&self.store, move |event| {
            if let Some(manager) = manager.upgrade() {
                manager.apply_external_change(event.new_value.as_deref());
            }
        })?;
        let previous = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if previous.is_some() {
            debug!("Replaced external selection listener");
        }
        Ok(())
    }

    /// Stop background work: pending reload and external listener
    pub fn shutdown(&self) {
        self.reload.cancel();
        let listener = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(listener) = listener {
            listener.detach();
        }
        debug!(context = %self.store.context_id(), "Tenant context manager shut down");
    }

    /// Whether the named feature is enabled for the active tenant
    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.state.borrow().has_feature(name)
    }

    /// Whether `key` names the active tenant
    #[must_use]
    pub fn is_tenant(&self, key: &str) -> bool {
        self.state.borrow().is_tenant(key)
    }

    /// Snapshot of the published state
    #[must_use]
    pub fn state(&self) -> ActiveTenantState {
        self.state.borrow().clone()
    }

    /// Key of the active tenant
    #[must_use]
    pub fn current_key(&self) -> TenantKey {
        self.state.borrow().current_tenant_key().clone()
    }

    /// Configuration of the active tenant
    #[must_use]
    pub fn current_config(&self) -> Arc<TenantConfig> {
        Arc::clone(self.state.borrow().current_config())
    }

    /// Receiver that always holds the latest state
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ActiveTenantState> {
        self.state.subscribe()
    }

    /// Receiver of every tenant change from now on
    #[must_use]
    pub fn subscribe_changes(&self) -> broadcast::Receiver<TenantChanged> {
        self.changes.subscribe()
    }

    /// Tenant selector options in declaration order
    #[must_use]
    pub fn available_tenants(&self) -> Vec<TenantOption> {
        self.registry.options()
    }

    /// Registry the manager resolves keys against
    #[must_use]
    pub const fn registry(&self) -> &Arc<TenantRegistry> {
        &self.registry
    }

    /// Options the manager was built with
    #[must_use]
    pub const fn options(&self) -> &ContextOptions {
        &self.options
    }
}

impl Drop for TenantContextManager {
    fn drop(&mut self) {
        self.reload.cancel();
    }
}

/// Builder for [`TenantContextManager`]
pub struct TenantContextManagerBuilder {
    registry: Arc<TenantRegistry>,
    store: Arc<dyn SelectionStore>,
    branding: Arc<dyn BrandingSink>,
    reload: Arc<dyn ReloadScheduler>,
    options: ContextOptions,
}

impl TenantContextManagerBuilder {
    /// Builder with the tracing branding sink, no reloads and default options
    #[must_use]
    pub fn new(registry: Arc<TenantRegistry>, store: Arc<dyn SelectionStore>) -> Self {
        Self {
            registry,
            store,
            branding: Arc::new(TracingBrandingSink),
            reload: Arc::new(NoReload),
            options: ContextOptions::default(),
        }
    }

    /// Send branding updates to `branding`
    #[must_use]
    pub fn with_branding(mut self, branding: Arc<dyn BrandingSink>) -> Self {
        self.branding = branding;
        self
    }

    /// Schedule reloads through `reload`
    #[must_use]
    pub fn with_reload_scheduler(mut self, reload: Arc<dyn ReloadScheduler>) -> Self {
        self.reload = reload;
        self
    }

    /// Override the default options
    #[must_use]
    pub const fn with_options(mut self, options: ContextOptions) -> Self {
        self.options = options;
        self
    }

    /// Read the persisted selection and build the manager
    #[must_use]
    pub fn build(self) -> TenantContextManager {
        let initial = TenantContextManager::initial_state(&self.registry, self.store.as_ref());
        info!(
            tenant = %initial.current_tenant_key(),
            context = %self.store.context_id(),
            "Tenant context initialized"
        );
        let (state, _) = watch::channel(initial);
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        TenantContextManager {
            registry: self.registry,
            store: self.store,
            branding: self.branding,
            reload: self.reload,
            options: self.options,
            state,
            changes,
            transition: Mutex::new(()),
            listener: Mutex::new(None),
        }
    }
}
