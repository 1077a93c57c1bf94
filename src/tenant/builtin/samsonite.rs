// ABOUTME: Samsonite tenant configuration (premium luggage)
// ABOUTME: Every feature enabled, tighter bid and budget rails than GCPL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    standard_api, standard_dashboard, standard_export, standard_notifications, standard_ui,
    strings,
};
use crate::models::{
    Branding, BusinessConfig, BusinessRules, FeatureFlags, NotificationSettings, TenantConfig,
    TenantKey,
};

/// Samsonite configuration
#[must_use]
pub fn config() -> TenantConfig {
    TenantConfig {
        key: TenantKey::normalize("samsonite"),
        name: "Samsonite".into(),
        display_name: "Samsonite Analytics".into(),
        description: "Samsonite - Premium Luggage Analytics Dashboard".into(),
        branding: Branding {
            logo: "/assets/logos/samsonite-logo.png".into(),
            favicon: "/assets/favicons/samsonite-favicon.ico".into(),
            primary_color: "#d32f2f".into(),
            secondary_color: "#1976d2".into(),
            accent_color: "#ff5722".into(),
        },
        business: BusinessConfig {
            default_brand: "Samsonite".into(),
            supported_platforms: strings(&["Amazon", "Flipkart"]),
            default_platform: "Flipkart".into(),
        },
        brands: strings(&["Samsonite", "American Tourister", "Delsey", "Tumi"]),
        features: FeatureFlags::all_enabled(),
        ui: standard_ui(),
        api: standard_api(),
        dashboard: standard_dashboard(),
        notifications: NotificationSettings {
            budget_threshold: 85,
            performance_threshold: -15,
            ..standard_notifications()
        },
        export: standard_export(),
        business_rules: BusinessRules {
            min_bid_amount: 0.20,
            max_bid_amount: 50.00,
            min_budget_amount: 20.00,
            max_budget_amount: 5_000.00,
            bid_increment_step: 0.10,
            budget_increment_step: 20.00,
        },
    }
}
