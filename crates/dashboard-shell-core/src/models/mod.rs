// ABOUTME: Core data models for tenant configuration and feature gating
// ABOUTME: Re-exports TenantConfig, its nested blocks, TenantKey and the Feature set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Closed feature flag enumeration and per-tenant flag maps
pub mod feature;
/// Tenant identity and immutable configuration records
pub mod tenant;

pub use feature::{Feature, FeatureFlags};
pub use tenant::{
    ApiSettings, Branding, BusinessConfig, BusinessRules, DashboardConfig, ExportSettings,
    NotificationSettings, TenantConfig, TenantKey, UiConfig,
};
