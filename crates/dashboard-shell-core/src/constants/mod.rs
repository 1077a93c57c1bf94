// ABOUTME: System-wide constants for storage keys, tenants, API namespaces and timings
// ABOUTME: Shared by the registry, persistence, routing and context layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults. Environment overrides are read by the root crate's
//! `config::environment` module, never here.

/// Persisted selection store keys
pub mod storage {
    /// Key under which the selected tenant key is persisted
    pub const SELECTED_CLIENT_KEY: &str = "selectedClient";

    /// File name used by the file-backed selection store
    pub const SELECTION_FILE_NAME: &str = "selection.json";

    /// Directory created under the platform data dir
    pub const DATA_DIR_NAME: &str = "dashboard-shell";

    /// Default poll interval for cross-process change detection
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

    /// Capacity of the storage change broadcast channel
    pub const EVENT_CHANNEL_CAPACITY: usize = 64;
}

/// Tenant registry defaults
pub mod tenants {
    /// Tenant used whenever the requested or persisted key is not registered
    pub const DEFAULT_TENANT_KEY: &str = "gcpl";
}

/// API routing constants
pub mod api {
    /// Fallback base URL when `API_BASE_URL` is not configured
    pub const DEFAULT_API_BASE_URL: &str = "https://react-api-script.onrender.com";

    /// Shared namespace segment for tenant-agnostic endpoints
    pub const APP_NAMESPACE: &str = "app";

    /// Endpoints that never vary by tenant
    pub const TENANT_AGNOSTIC_ENDPOINTS: &[&str] = &[
        "goals-add",
        "achieved-goals-count",
        "display-goals",
        "amazon-product-play-pause",
    ];

    /// Path of the CSRF token endpoint
    pub const CSRF_TOKEN_PATH: &str = "csrfToken/";

    /// Path of the login endpoint
    pub const LOGIN_PATH: &str = "login/";

    /// Path of the registration endpoint (under the app namespace)
    pub const REGISTER_PATH: &str = "app/register/";
}

/// Tenant switch timings
pub mod switching {
    /// Grace period between publishing a switch and the forced reload
    pub const DEFAULT_RELOAD_DELAY_MS: u64 = 100;

    /// Capacity of the in-process tenant change broadcast channel
    pub const CHANGE_CHANNEL_CAPACITY: usize = 32;
}

/// Service identification for logs
pub mod service_names {
    /// Service name reported in structured logs
    pub const DASHBOARD_SHELL: &str = "dashboard-shell";
}
