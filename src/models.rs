// ABOUTME: Re-exports the tenant configuration data model from dashboard-shell-core
// ABOUTME: TenantConfig and nested blocks, TenantKey and the Feature flag set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Tenant configuration records are immutable once loaded and shared as
//! `Arc<TenantConfig>`; switching tenants only changes which record is current.

pub use dashboard_shell_core::models::{
    ApiSettings, Branding, BusinessConfig, BusinessRules, DashboardConfig, ExportSettings, Feature,
    FeatureFlags, NotificationSettings, TenantConfig, TenantKey, UiConfig,
};
