// ABOUTME: GCPL tenant configuration (Godrej Consumer Products Limited)
// ABOUTME: Default tenant; every feature enabled on Flipkart and Amazon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    standard_api, standard_dashboard, standard_export, standard_notifications, standard_ui,
    strings,
};
use crate::models::{
    Branding, BusinessConfig, BusinessRules, FeatureFlags, TenantConfig, TenantKey,
};

/// GCPL configuration
#[must_use]
pub fn config() -> TenantConfig {
    TenantConfig {
        key: TenantKey::normalize("gcpl"),
        name: "GCPL".into(),
        display_name: "GCPL Analytics".into(),
        description: "Godrej Consumer Products Limited - Analytics Dashboard".into(),
        branding: Branding {
            logo: "/assets/logos/gcpl-logo.png".into(),
            favicon: "/assets/favicons/gcpl-favicon.ico".into(),
            primary_color: "#1976d2".into(),
            secondary_color: "#dc004e".into(),
            accent_color: "#ff9800".into(),
        },
        business: BusinessConfig {
            default_brand: "Cinthol Grocery".into(),
            supported_platforms: strings(&["Flipkart", "Amazon"]),
            default_platform: "Flipkart".into(),
        },
        brands: strings(&[
            "Cinthol Grocery",
            "Godrej Expert",
            "Good Knight",
            "Hit",
            "Protekt",
        ]),
        features: FeatureFlags::all_enabled(),
        ui: standard_ui(),
        api: standard_api(),
        dashboard: standard_dashboard(),
        notifications: standard_notifications(),
        export: standard_export(),
        business_rules: BusinessRules {
            min_bid_amount: 0.10,
            max_bid_amount: 100.00,
            min_budget_amount: 10.00,
            max_budget_amount: 10_000.00,
            bid_increment_step: 0.05,
            budget_increment_step: 10.00,
        },
    }
}
