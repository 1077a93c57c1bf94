// ABOUTME: Environment configuration for the dashboard shell
// ABOUTME: Parses API base URL, tenant defaults, selection store backend and switch timings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::api::DEFAULT_API_BASE_URL;
use crate::constants::env_vars;
use crate::constants::storage::DEFAULT_POLL_INTERVAL_MS;
use crate::constants::switching::DEFAULT_RELOAD_DELAY_MS;
use crate::context::ContextOptions;
use crate::errors::{AppError, AppResult};
use crate::persistence::FileSelectionStore;
use crate::tenant::TenantRegistry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether this is a production deployment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Whether this is a test run
    #[must_use]
    pub const fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Backend persisting the selected tenant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStoreKind {
    /// Process-local; nothing survives a restart
    Memory,
    /// JSON file shared between processes
    #[default]
    File,
}

impl FromStr for SelectionStoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(AppError::config_invalid(format!(
                "unknown selection store '{other}', expected 'memory' or 'file'"
            ))),
        }
    }
}

impl fmt::Display for SelectionStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Dashboard shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Base URL of the dashboard API, without trailing separator
    pub api_base_url: String,
    /// Overrides the registry's default tenant
    pub default_tenant: Option<String>,
    /// Backend persisting the selected tenant
    pub selection_store: SelectionStoreKind,
    /// Explicit selection file; platform data dir when `None`
    pub selection_file: Option<PathBuf>,
    /// YAML tenant table replacing the built-in tenants
    pub tenants_file: Option<PathBuf>,
    /// Delay between a switch and its full reload
    pub reload_delay: Duration,
    /// Also reload when another context changes the selection
    pub reload_on_external_change: bool,
    /// Poll interval of the selection file watcher
    pub store_poll_interval: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            default_tenant: None,
            selection_store: SelectionStoreKind::default(),
            selection_file: None,
            tenants_file: None,
            reload_delay: Duration::from_millis(DEFAULT_RELOAD_DELAY_MS),
            reload_on_external_change: false,
            store_poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl ShellConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but cannot be parsed or
    /// the resulting configuration is invalid.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let api_base_url = if let Ok(url) = env::var(env_vars::API_BASE_URL) {
            url
        } else {
            warn!(
                default = DEFAULT_API_BASE_URL,
                "{} not set, using default API base URL",
                env_vars::API_BASE_URL
            );
            DEFAULT_API_BASE_URL.to_owned()
        };

        let config = Self {
            environment: Environment::from_str_or_default(
                &env_var_or(env_vars::ENVIRONMENT, "development"),
            ),
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            default_tenant: non_empty_var(env_vars::DEFAULT_TENANT),
            selection_store: env_var_or(env_vars::SELECTION_STORE, "file")
                .parse()
                .context("Invalid SELECTION_STORE value")?,
            selection_file: non_empty_var(env_vars::SELECTION_FILE).map(PathBuf::from),
            tenants_file: non_empty_var(env_vars::TENANTS_FILE).map(PathBuf::from),
            reload_delay: Duration::from_millis(
                env_var_or(
                    env_vars::RELOAD_DELAY_MS,
                    &DEFAULT_RELOAD_DELAY_MS.to_string(),
                )
                .parse()
                .context("Invalid RELOAD_DELAY_MS value")?,
            ),
            reload_on_external_change: env_var_or(env_vars::RELOAD_ON_EXTERNAL_CHANGE, "false")
                .parse()
                .context("Invalid RELOAD_ON_EXTERNAL_CHANGE value")?,
            store_poll_interval: Duration::from_millis(
                env_var_or(
                    env_vars::STORE_POLL_INTERVAL_MS,
                    &DEFAULT_POLL_INTERVAL_MS.to_string(),
                )
                .parse()
                .context("Invalid STORE_POLL_INTERVAL_MS value")?,
            ),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when the API base URL is not an absolute http(s) URL
    /// or the poll interval is zero.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid API_BASE_URL '{}'", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "API_BASE_URL must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if self.store_poll_interval.is_zero() {
            return Err(anyhow::anyhow!("STORE_POLL_INTERVAL_MS must be positive"));
        }
        if self.environment.is_production() && self.selection_store == SelectionStoreKind::Memory {
            warn!("Memory selection store in production: selections are lost on restart");
        }
        Ok(())
    }

    /// Options handed to the tenant context manager
    #[must_use]
    pub const fn context_options(&self) -> ContextOptions {
        ContextOptions {
            reload_delay: self.reload_delay,
            reload_on_external_change: self.reload_on_external_change,
        }
    }

    /// Path of the file-backed selection store
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` when no path is configured and the platform
    /// has no data directory.
    pub fn selection_file_path(&self) -> AppResult<PathBuf> {
        self.selection_file
            .clone()
            .map_or_else(FileSelectionStore::default_path, Ok)
    }

    /// Build the tenant registry this configuration describes
    ///
    /// An unknown `default_tenant` keeps the registry's own default.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TenantRegistry::from_yaml_file`] when a tenant
    /// table is configured.
    pub fn load_registry(&self) -> AppResult<TenantRegistry> {
        let registry = match &self.tenants_file {
            Some(path) => {
                info!(path = %path.display(), "Loading tenant table");
                TenantRegistry::from_yaml_file(path)?
            }
            None => TenantRegistry::builtin(),
        };

        let Some(default_tenant) = &self.default_tenant else {
            return Ok(registry);
        };
        match registry.with_default(default_tenant) {
            Ok(overridden) => Ok(overridden),
            Err(e) => {
                warn!(
                    requested = %default_tenant,
                    error = %e,
                    "Ignoring {}",
                    env_vars::DEFAULT_TENANT
                );
                Ok(registry)
            }
        }
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} api={} store={} reload_delay={}ms reload_on_external_change={}",
            self.environment,
            self.api_base_url,
            self.selection_store,
            self.reload_delay.as_millis(),
            self.reload_on_external_change
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
