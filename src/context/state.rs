// ABOUTME: Snapshot of the active tenant published to every subscriber of the context manager
// ABOUTME: Switch phase, loading flag, last error, tenant epoch and convenience readers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{Feature, TenantConfig, TenantKey};
use serde::Serialize;
use std::sync::Arc;

/// Transition phase of the context manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SwitchPhase {
    /// Settled on `key`
    Idle {
        /// Active tenant
        key: TenantKey,
    },
    /// Moving from `from` to `to`; persistence has not completed yet
    Switching {
        /// Tenant still active
        from: TenantKey,
        /// Tenant being persisted
        to: TenantKey,
    },
}

/// Identity of the tenant data generation a value was produced under
///
/// Every tenant change produces a new scope, so anything tagged with an older
/// scope belongs to a previous tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheScope {
    /// Tenant the value belongs to
    pub tenant: TenantKey,
    /// Manager epoch when the value was stored
    pub epoch: u64,
}

/// Active tenant as seen by consumers
///
/// Fields are private so only the manager can move the state; readers get
/// accessors.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveTenantState {
    current_tenant_key: TenantKey,
    current_config: Arc<TenantConfig>,
    is_loading: bool,
    last_error: Option<String>,
    epoch: u64,
    phase: SwitchPhase,
}

impl ActiveTenantState {
    pub(crate) fn settled(key: TenantKey, config: Arc<TenantConfig>) -> Self {
        Self {
            phase: SwitchPhase::Idle { key: key.clone() },
            current_tenant_key: key,
            current_config: config,
            is_loading: false,
            last_error: None,
            epoch: 0,
        }
    }

    pub(crate) fn begin_switch(&mut self, to: TenantKey) {
        self.phase = SwitchPhase::Switching {
            from: self.current_tenant_key.clone(),
            to,
        };
        self.is_loading = true;
        self.last_error = None;
    }

    pub(crate) fn commit(&mut self, key: TenantKey, config: Arc<TenantConfig>) {
        self.phase = SwitchPhase::Idle { key: key.clone() };
        self.current_tenant_key = key;
        self.current_config = config;
        self.is_loading = false;
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.phase = SwitchPhase::Idle {
            key: self.current_tenant_key.clone(),
        };
        self.is_loading = false;
        self.last_error = Some(message);
    }

    pub(crate) fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }

    /// Key of the active tenant
    #[must_use]
    pub const fn current_tenant_key(&self) -> &TenantKey {
        &self.current_tenant_key
    }

    /// Configuration of the active tenant
    #[must_use]
    pub const fn current_config(&self) -> &Arc<TenantConfig> {
        &self.current_config
    }

    /// Whether a switch is in progress
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the most recent failed switch, until cleared
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of tenant changes since the manager was created
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Current transition phase
    #[must_use]
    pub const fn phase(&self) -> &SwitchPhase {
        &self.phase
    }

    /// Tenant and epoch to tag tenant-scoped data with
    #[must_use]
    pub fn cache_scope(&self) -> CacheScope {
        CacheScope {
            tenant: self.current_tenant_key.clone(),
            epoch: self.epoch,
        }
    }

    /// Whether the named feature is enabled for the active tenant
    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.current_config.has_feature(name)
    }

    /// Typed variant of [`Self::has_feature`]
    #[must_use]
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.current_config.is_enabled(feature)
    }

    /// Whether `key` names the active tenant after normalization
    #[must_use]
    pub fn is_tenant(&self, key: &str) -> bool {
        self.current_tenant_key == TenantKey::normalize(key)
    }

    /// Short name of the active tenant
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.current_config.name
    }

    /// Product title of the active tenant
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.current_config.display_name
    }

    /// Brand selected when the dashboard opens
    #[must_use]
    pub fn default_brand(&self) -> &str {
        &self.current_config.business.default_brand
    }

    /// Marketplaces of the active tenant
    #[must_use]
    pub fn supported_platforms(&self) -> &[String] {
        &self.current_config.business.supported_platforms
    }

    /// Marketplace selected when the dashboard opens
    #[must_use]
    pub fn default_platform(&self) -> &str {
        &self.current_config.business.default_platform
    }

    /// Theme color of the active tenant
    #[must_use]
    pub fn primary_color(&self) -> &str {
        &self.current_config.branding.primary_color
    }

    /// Accent color of the active tenant
    #[must_use]
    pub fn secondary_color(&self) -> &str {
        &self.current_config.branding.secondary_color
    }

    /// Logo asset path of the active tenant
    #[must_use]
    pub fn logo(&self) -> &str {
        &self.current_config.branding.logo
    }

    /// Avatar initials of the active tenant
    #[must_use]
    pub fn initials(&self) -> String {
        self.current_config.initials()
    }
}
