// ABOUTME: Bunge tenant configuration (agricultural products)
// ABOUTME: Every feature enabled with an analytics widget on the landing dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    standard_api, standard_dashboard, standard_export, standard_notifications, standard_ui,
    strings,
};
use crate::models::{
    ApiSettings, Branding, BusinessConfig, BusinessRules, DashboardConfig, ExportSettings,
    FeatureFlags, NotificationSettings, TenantConfig, TenantKey,
};

/// Bunge configuration
#[must_use]
pub fn config() -> TenantConfig {
    TenantConfig {
        key: TenantKey::normalize("bunge"),
        name: "Bunge".into(),
        display_name: "Bunge Analytics".into(),
        description: "Bunge - Agricultural Products Analytics Dashboard".into(),
        branding: Branding {
            logo: "/assets/logos/bunge-logo.png".into(),
            favicon: "/assets/favicons/bunge-favicon.ico".into(),
            primary_color: "#f57c00".into(),
            secondary_color: "#388e3c".into(),
            accent_color: "#9c27b0".into(),
        },
        business: BusinessConfig {
            default_brand: "Bunge".into(),
            supported_platforms: strings(&["Amazon", "Flipkart"]),
            default_platform: "Flipkart".into(),
        },
        brands: strings(&["Bunge", "Dalda", "Nutrela", "Fortune"]),
        features: FeatureFlags::all_enabled(),
        ui: standard_ui(),
        api: ApiSettings {
            timeout: 35_000,
            retry_delay: 2_000,
            ..standard_api()
        },
        dashboard: DashboardConfig {
            default_widgets: strings(&[
                "campaigns",
                "keywords",
                "products",
                "performance",
                "analytics",
            ]),
            max_widgets: 10,
            ..standard_dashboard()
        },
        notifications: NotificationSettings {
            budget_threshold: 75,
            performance_threshold: -30,
            ..standard_notifications()
        },
        export: ExportSettings {
            max_records: 15_000,
            ..standard_export()
        },
        business_rules: BusinessRules {
            min_bid_amount: 0.08,
            max_bid_amount: 75.00,
            min_budget_amount: 8.00,
            max_budget_amount: 8_000.00,
            bid_increment_step: 0.02,
            budget_increment_step: 8.00,
        },
    }
}
