// ABOUTME: Re-exports system-wide constants from dashboard-shell-core
// ABOUTME: Adds environment variable names read by the configuration layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults live in [`dashboard_shell_core::constants`]; this module
//! re-exports them and names the environment variables that override them.

pub use dashboard_shell_core::constants::{api, service_names, storage, switching, tenants};

/// Environment variable names
pub mod env_vars {
    /// Base URL of the dashboard API
    pub const API_BASE_URL: &str = "API_BASE_URL";
    /// Tenant used when nothing valid is persisted
    pub const DEFAULT_TENANT: &str = "DEFAULT_TENANT";
    /// Selection store backend (`memory` or `file`)
    pub const SELECTION_STORE: &str = "SELECTION_STORE";
    /// Path of the file-backed selection store
    pub const SELECTION_FILE: &str = "SELECTION_FILE";
    /// Optional YAML tenant table replacing the built-in tenants
    pub const TENANTS_FILE: &str = "TENANTS_FILE";
    /// Delay before a forced reload after a switch
    pub const RELOAD_DELAY_MS: &str = "RELOAD_DELAY_MS";
    /// Reload when another context changes the selection
    pub const RELOAD_ON_EXTERNAL_CHANGE: &str = "RELOAD_ON_EXTERNAL_CHANGE";
    /// Poll interval of the file store watcher
    pub const STORE_POLL_INTERVAL_MS: &str = "STORE_POLL_INTERVAL_MS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}
