// ABOUTME: Tenant registry with normalized lookup, default fallback and ordered listing
// ABOUTME: Builds from built-in tenants or a validated YAML tenant table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::builtin;
use crate::constants::tenants::DEFAULT_TENANT_KEY;
use crate::errors::{AppError, AppResult};
use crate::models::{Branding, BusinessRules, FeatureFlags, TenantConfig, TenantKey, UiConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// One registered tenant
#[derive(Debug, Clone, Serialize)]
pub struct TenantEntry {
    /// Normalized tenant key
    pub key: TenantKey,
    /// Shared immutable configuration
    pub config: Arc<TenantConfig>,
}

/// Selector option for tenant switcher controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantOption {
    /// Tenant short name
    pub value: String,
    /// Display label
    pub label: String,
    /// Tenant key to pass to `switch`
    pub key: TenantKey,
}

/// On-disk tenant table accepted by [`TenantRegistry::from_yaml_str`]
#[derive(Debug, Clone, Deserialize)]
pub struct TenantTable {
    /// Default tenant key; the first declared tenant when omitted
    #[serde(default)]
    pub default: Option<String>,
    /// Tenants in declaration order
    pub tenants: Vec<TenantConfig>,
}

/// Immutable tenant registry
///
/// The registry is built once and shared behind an `Arc`; nothing in it can
/// be mutated after construction.
#[derive(Debug, Clone)]
pub struct TenantRegistry {
    entries: Vec<TenantEntry>,
    index: HashMap<TenantKey, usize>,
    default: TenantEntry,
}

impl TenantRegistry {
    /// Registry of the built-in tenants, defaulting to `gcpl`
    #[must_use]
    pub fn builtin() -> Self {
        let entries: Vec<TenantEntry> = builtin::all()
            .into_iter()
            .map(|config| TenantEntry {
                key: config.key.clone(),
                config: Arc::new(config),
            })
            .collect();
        let index = Self::build_index(&entries);
        let default_key = TenantKey::normalize(DEFAULT_TENANT_KEY);
        // Built-in tenants always include the default; fall back to the first entry regardless
        let default = index
            .get(&default_key)
            .and_then(|i| entries.get(*i))
            .or_else(|| entries.first())
            .cloned()
            .unwrap_or_else(|| TenantEntry {
                key: default_key,
                config: Arc::new(builtin::gcpl::config()),
            });
        Self {
            entries,
            index,
            default,
        }
    }

    /// Build a registry from explicit configurations
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when no tenant is supplied, a config violates
    /// its invariants, a key is registered twice, or `default_key` is not
    /// registered.
    pub fn new(default_key: &str, configs: Vec<TenantConfig>) -> AppResult<Self> {
        if configs.is_empty() {
            return Err(AppError::config_invalid(
                "tenant registry requires at least one tenant",
            ));
        }

        let mut entries = Vec::with_capacity(configs.len());
        let mut index = HashMap::with_capacity(configs.len());
        for config in configs {
            config.validate()?;
            if index.contains_key(&config.key) {
                return Err(AppError::config_invalid(format!(
                    "tenant '{}' is registered more than once",
                    config.key
                )));
            }
            index.insert(config.key.clone(), entries.len());
            entries.push(TenantEntry {
                key: config.key.clone(),
                config: Arc::new(config),
            });
        }

        let default_key = TenantKey::normalize(default_key);
        let default = index
            .get(&default_key)
            .and_then(|i| entries.get(*i))
            .cloned()
            .ok_or_else(|| {
                AppError::config_invalid(format!(
                    "default tenant '{default_key}' is not registered"
                ))
            })?;

        Ok(Self {
            entries,
            index,
            default,
        })
    }

    /// Parse and validate a YAML tenant table
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` for malformed YAML and the errors of
    /// [`Self::new`] for invalid contents.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let table: TenantTable = serde_yaml::from_str(yaml)?;
        let default_key = match table.default {
            Some(key) => key,
            None => table
                .tenants
                .first()
                .map(|config| config.key.to_string())
                .unwrap_or_default(),
        };
        Self::new(&default_key, table.tenants)
    }

    /// Read, parse and validate a YAML tenant table from disk
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` when the file cannot be read, otherwise the
    /// errors of [`Self::from_yaml_str`].
    pub fn from_yaml_file(path: &Path) -> AppResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            AppError::storage(format!("cannot read tenant table {}", path.display())).with_source(e)
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Copy of this registry falling back to `key` instead
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when `key` is not registered.
    pub fn with_default(&self, key: &str) -> AppResult<Self> {
        let normalized = TenantKey::normalize(key);
        let default = self.find(&normalized).cloned().ok_or_else(|| {
            AppError::config_invalid(format!("default tenant '{normalized}' is not registered"))
        })?;
        Ok(Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
            default,
        })
    }

    fn build_index(entries: &[TenantEntry]) -> HashMap<TenantKey, usize> {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.key.clone(), i))
            .collect()
    }

    fn find(&self, key: &TenantKey) -> Option<&TenantEntry> {
        self.index.get(key).and_then(|i| self.entries.get(*i))
    }

    /// Key of the fallback tenant
    #[must_use]
    pub const fn default_key(&self) -> &TenantKey {
        &self.default.key
    }

    /// Configuration of the fallback tenant
    #[must_use]
    pub fn default_config(&self) -> Arc<TenantConfig> {
        Arc::clone(&self.default.config)
    }

    /// Registered key for `key`, or the default key when it is not registered
    #[must_use]
    pub fn resolve_key(&self, key: &str) -> TenantKey {
        let normalized = TenantKey::normalize(key);
        if self.index.contains_key(&normalized) {
            normalized
        } else {
            debug!(requested = %key, fallback = %self.default.key, "Tenant not registered, using default");
            self.default.key.clone()
        }
    }

    /// Configuration for `key`, falling back to the default tenant
    #[must_use]
    pub fn lookup(&self, key: &str) -> Arc<TenantConfig> {
        let normalized = TenantKey::normalize(key);
        self.find(&normalized).map_or_else(
            || {
                debug!(requested = %key, fallback = %self.default.key, "Tenant not registered, using default config");
                self.default_config()
            },
            |entry| Arc::clone(&entry.config),
        )
    }

    /// Strict lookup without fallback
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<TenantConfig>> {
        self.find(&TenantKey::normalize(key))
            .map(|entry| Arc::clone(&entry.config))
    }

    /// Whether `key` names a registered tenant after normalization
    #[must_use]
    pub fn is_registered(&self, key: &str) -> bool {
        self.index.contains_key(&TenantKey::normalize(key))
    }

    /// Registered tenants in declaration order
    #[must_use]
    pub fn list(&self) -> &[TenantEntry] {
        &self.entries
    }

    /// Registered keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &TenantKey> {
        self.entries.iter().map(|entry| &entry.key)
    }

    /// Number of registered tenants
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty (never true for a constructed registry)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selector options in declaration order
    #[must_use]
    pub fn options(&self) -> Vec<TenantOption> {
        self.entries
            .iter()
            .map(|entry| TenantOption {
                value: entry.config.name.clone(),
                label: entry.config.display_name.clone(),
                key: entry.key.clone(),
            })
            .collect()
    }

    /// Branding of `key` (default tenant when unknown)
    #[must_use]
    pub fn branding(&self, key: &str) -> Branding {
        self.lookup(key).branding.clone()
    }

    /// Feature flags of `key` (default tenant when unknown)
    #[must_use]
    pub fn features(&self, key: &str) -> FeatureFlags {
        self.lookup(key).features.clone()
    }

    /// Whether `feature` is enabled for `key`; unknown features are disabled
    #[must_use]
    pub fn is_feature_enabled(&self, key: &str, feature: &str) -> bool {
        self.lookup(key).has_feature(feature)
    }

    /// Business rules of `key` (default tenant when unknown)
    #[must_use]
    pub fn business_rules(&self, key: &str) -> BusinessRules {
        self.lookup(key).business_rules.clone()
    }

    /// UI configuration of `key` (default tenant when unknown)
    #[must_use]
    pub fn ui(&self, key: &str) -> UiConfig {
        self.lookup(key).ui.clone()
    }
}

impl Default for TenantRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
