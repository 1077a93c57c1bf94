// ABOUTME: Bowlers tenant configuration (sports equipment)
// ABOUTME: Simplified dashboard without negative keyword management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    standard_api, standard_dashboard, standard_export, standard_notifications, standard_ui,
    strings,
};
use crate::models::{
    ApiSettings, Branding, BusinessConfig, BusinessRules, DashboardConfig, ExportSettings, Feature,
    FeatureFlags, NotificationSettings, TenantConfig, TenantKey, UiConfig,
};

/// Bowlers configuration
#[must_use]
pub fn config() -> TenantConfig {
    TenantConfig {
        key: TenantKey::normalize("bowlers"),
        name: "Bowlers".into(),
        display_name: "Bowlers Analytics".into(),
        description: "Bowlers - Sports Equipment Analytics Dashboard".into(),
        branding: Branding {
            logo: "/assets/logos/bowlers-logo.png".into(),
            favicon: "/assets/favicons/bowlers-favicon.ico".into(),
            primary_color: "#388e3c".into(),
            secondary_color: "#f57c00".into(),
            accent_color: "#2196f3".into(),
        },
        business: BusinessConfig {
            default_brand: "Bowlers".into(),
            supported_platforms: strings(&["Amazon", "Flipkart"]),
            default_platform: "Flipkart".into(),
        },
        brands: strings(&["Bowlers", "Cricket Pro", "Sports Elite"]),
        features: FeatureFlags::all_enabled().with(Feature::NegativeKeywords, false),
        ui: UiConfig {
            max_date_range: 180,
            refresh_interval: 600_000,
            ..standard_ui()
        },
        api: ApiSettings {
            timeout: 25_000,
            retry_attempts: 2,
            retry_delay: 1_500,
            cache_timeout: 600_000,
            ..standard_api()
        },
        dashboard: DashboardConfig {
            enable_customization: false,
            max_widgets: 6,
            ..standard_dashboard()
        },
        notifications: NotificationSettings {
            enable_system_alerts: false,
            budget_threshold: 90,
            performance_threshold: -25,
            ..standard_notifications()
        },
        export: ExportSettings {
            enable_pdf: false,
            max_records: 5_000,
            ..standard_export()
        },
        business_rules: BusinessRules {
            min_bid_amount: 0.15,
            max_bid_amount: 25.00,
            min_budget_amount: 15.00,
            max_budget_amount: 2_500.00,
            bid_increment_step: 0.05,
            budget_increment_step: 15.00,
        },
    }
}
