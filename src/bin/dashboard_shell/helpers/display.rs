// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for the dashboard-shell CLI
// ABOUTME: Consistent display of tenant tables, active tenant details and feature flags

use dashboard_shell::context::{ActiveTenantState, TenantChanged};
use dashboard_shell::models::{Feature, TenantConfig};
use dashboard_shell::tenant::TenantOption;

/// Print the tenant selector options as a table, marking the active tenant
pub fn display_tenant_table(options: &[TenantOption], active: &str) {
    println!("{:<3}{:<12}{:<12}{}", "", "KEY", "NAME", "DISPLAY NAME");
    for option in options {
        let marker = if option.key == active { "*" } else { "" };
        println!(
            "{marker:<3}{:<12}{:<12}{}",
            option.key, option.value, option.label
        );
    }
}

/// Print the active tenant summary
pub fn display_active_tenant(state: &ActiveTenantState) {
    println!("Active tenant: {} ({})", state.current_tenant_key(), state.display_name());
    println!("{}", "=".repeat(50));
    println!("   Client: {}", state.client_name());
    println!("   Initials: {}", state.initials());
    println!("   Default brand: {}", state.default_brand());
    println!(
        "   Platforms: {} (default {})",
        state.supported_platforms().join(", "),
        state.default_platform()
    );
    println!(
        "   Colors: {} / {}",
        state.primary_color(),
        state.secondary_color()
    );
    println!("   Logo: {}", state.logo());
    println!("   Epoch: {}", state.epoch());
    if let Some(error) = state.last_error() {
        println!("   Last error: {error}");
    }
}

/// Print every feature flag of `config` with its label
pub fn display_features(config: &TenantConfig) {
    println!("Features for {} ({})", config.display_name, config.key);
    println!("{}", "=".repeat(50));
    for feature in Feature::ALL {
        let state = if config.is_enabled(feature) { "on" } else { "off" };
        println!("   {:<20}{:<5}{}", feature.as_str(), state, feature.label());
    }
}

/// Print one tenant change observed while watching
pub fn display_change(change: &TenantChanged) {
    println!(
        "{} -> {} ({}, epoch {})",
        chrono::Utc::now().format("%H:%M:%S"),
        change.client,
        change.source,
        change.epoch
    );
}
