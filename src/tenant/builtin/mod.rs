// ABOUTME: Built-in tenant configurations shipped with the dashboard shell
// ABOUTME: Shared baseline blocks plus one module of literals per tenant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Built-in tenants in declaration (business priority) order:
//! `gcpl`, `samsonite`, `bowlers`, `bunge`.

/// Bowlers tenant
pub mod bowlers;
/// Bunge tenant
pub mod bunge;
/// GCPL tenant, the default
pub mod gcpl;
/// Samsonite tenant
pub mod samsonite;

use crate::models::{ApiSettings, DashboardConfig, ExportSettings, NotificationSettings, UiConfig};

/// All built-in tenants in declaration order
#[must_use]
pub fn all() -> Vec<crate::models::TenantConfig> {
    vec![
        gcpl::config(),
        samsonite::config(),
        bowlers::config(),
        bunge::config(),
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// Baseline dashboard chrome, overridden per tenant with struct update syntax
fn standard_ui() -> UiConfig {
    UiConfig {
        show_brand_selector: true,
        show_platform_selector: true,
        default_date_range: 30,
        max_date_range: 365,
        refresh_interval: 300_000,
        enable_auto_refresh: true,
        show_wallet_balance: true,
        enable_notifications: true,
    }
}

fn standard_api() -> ApiSettings {
    ApiSettings {
        timeout: 30_000,
        retry_attempts: 3,
        retry_delay: 1_000,
        enable_caching: true,
        cache_timeout: 300_000,
    }
}

fn standard_dashboard() -> DashboardConfig {
    DashboardConfig {
        default_widgets: strings(&["campaigns", "keywords", "products", "performance"]),
        enable_customization: true,
        max_widgets: 8,
    }
}

fn standard_notifications() -> NotificationSettings {
    NotificationSettings {
        enable_budget_alerts: true,
        enable_performance_alerts: true,
        enable_system_alerts: true,
        budget_threshold: 80,
        performance_threshold: -20,
    }
}

fn standard_export() -> ExportSettings {
    ExportSettings {
        enable_excel: true,
        enable_csv: true,
        enable_pdf: true,
        max_records: 10_000,
    }
}
