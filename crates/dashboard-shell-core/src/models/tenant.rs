// ABOUTME: Tenant identity and immutable per-tenant configuration records
// ABOUTME: TenantKey normalization, TenantConfig with branding, business, UI and rule blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::feature::{Feature, FeatureFlags};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized tenant identifier (trimmed, lowercase)
///
/// Construction always normalizes, so two keys that differ only in case or
/// surrounding whitespace compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TenantKey(String);

impl TenantKey {
    /// Normalize a raw key
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Borrow the normalized key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalization left nothing behind
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for TenantKey {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for TenantKey {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<TenantKey> for String {
    fn from(key: TenantKey) -> Self {
        key.0
    }
}

impl AsRef<str> for TenantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TenantKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TenantKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual identity tokens; paths and colors are opaque to the core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    /// Logo asset path
    pub logo: String,
    /// Favicon asset path
    pub favicon: String,
    /// Primary brand color token
    pub primary_color: String,
    /// Secondary brand color token
    pub secondary_color: String,
    /// Accent color token
    pub accent_color: String,
}

/// Brand and marketplace defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessConfig {
    /// Brand selected when the dashboard opens
    pub default_brand: String,
    /// Marketplaces this tenant sells on; never empty
    pub supported_platforms: Vec<String>,
    /// Marketplace selected when the dashboard opens; member of `supported_platforms`
    pub default_platform: String,
}

/// Dashboard chrome settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Show the brand dropdown in the header
    pub show_brand_selector: bool,
    /// Show the marketplace dropdown in the header
    pub show_platform_selector: bool,
    /// Default reporting window in days
    pub default_date_range: u32,
    /// Maximum reporting window in days
    pub max_date_range: u32,
    /// Auto refresh interval in milliseconds
    pub refresh_interval: u64,
    /// Refresh dashboard data every `refresh_interval`
    pub enable_auto_refresh: bool,
    /// Show the advertising wallet balance
    pub show_wallet_balance: bool,
    /// Show the notification bell
    pub enable_notifications: bool,
}

/// Per-tenant HTTP client behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSettings {
    /// Request timeout in milliseconds
    pub timeout: u64,
    /// Retries after a failed request
    pub retry_attempts: u32,
    /// Delay between retries in milliseconds
    pub retry_delay: u64,
    /// Cache GET responses
    pub enable_caching: bool,
    /// Response cache lifetime in milliseconds
    pub cache_timeout: u64,
}

/// Landing dashboard layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Widgets shown on first load, in order
    pub default_widgets: Vec<String>,
    /// Let users rearrange widgets
    pub enable_customization: bool,
    /// Upper bound on widgets per dashboard
    pub max_widgets: u32,
}

/// Alerting thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Alert when spend nears the budget
    pub enable_budget_alerts: bool,
    /// Alert on performance swings
    pub enable_performance_alerts: bool,
    /// Alert on platform incidents
    pub enable_system_alerts: bool,
    /// Budget consumption percentage that triggers an alert
    pub budget_threshold: u32,
    /// Performance change percentage that triggers an alert (negative = drop)
    pub performance_threshold: i32,
}

/// Report export options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Excel export
    #[serde(rename = "enableExcel")]
    pub enable_excel: bool,
    /// CSV export
    #[serde(rename = "enableCSV")]
    pub enable_csv: bool,
    /// PDF export
    #[serde(rename = "enablePDF")]
    pub enable_pdf: bool,
    /// Row limit per export
    #[serde(rename = "maxRecords")]
    pub max_records: u32,
}

/// Bid and budget guard rails; values are opaque to the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRules {
    /// Lowest bid accepted
    pub min_bid_amount: f64,
    /// Highest bid accepted
    pub max_bid_amount: f64,
    /// Lowest daily budget accepted
    pub min_budget_amount: f64,
    /// Highest daily budget accepted
    pub max_budget_amount: f64,
    /// Step used by bid steppers
    pub bid_increment_step: f64,
    /// Step used by budget steppers
    pub budget_increment_step: f64,
}

/// Immutable configuration record for one tenant
///
/// Branding and business fields are flattened so the serialized shape matches
/// the flat client configuration objects the dashboard front end consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    /// Stable lowercase identifier
    pub key: TenantKey,
    /// Short name shown in the tenant selector
    pub name: String,
    /// Product title, also used as the window title
    pub display_name: String,
    /// One-line description
    pub description: String,
    /// Colors, logo and favicon
    #[serde(flatten)]
    pub branding: Branding,
    /// Default brand and marketplaces
    #[serde(flatten)]
    pub business: BusinessConfig,
    /// Brands available under this tenant, in display order
    pub brands: Vec<String>,
    /// Feature gates; a missing entry means disabled
    pub features: FeatureFlags,
    /// Dashboard chrome
    pub ui: UiConfig,
    /// HTTP client behaviour
    pub api: ApiSettings,
    /// Landing dashboard layout
    pub dashboard: DashboardConfig,
    /// Alerting thresholds
    pub notifications: NotificationSettings,
    /// Report export options
    pub export: ExportSettings,
    /// Bid and budget guard rails
    pub business_rules: BusinessRules,
}

impl TenantConfig {
    /// Check the structural invariants of the record
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when the key is empty, names are blank, no
    /// platform is supported, or the default platform is not supported.
    pub fn validate(&self) -> AppResult<()> {
        if self.key.is_empty() {
            return Err(AppError::config_invalid("tenant key must not be empty"));
        }
        if self.name.trim().is_empty() || self.display_name.trim().is_empty() {
            return Err(AppError::config_invalid(format!(
                "tenant '{}' must have a name and display name",
                self.key
            )));
        }
        if self.business.supported_platforms.is_empty() {
            return Err(AppError::config_invalid(format!(
                "tenant '{}' must support at least one platform",
                self.key
            )));
        }
        if !self
            .business
            .supported_platforms
            .contains(&self.business.default_platform)
        {
            return Err(AppError::config_invalid(format!(
                "tenant '{}' default platform '{}' is not in supported platforms {:?}",
                self.key, self.business.default_platform, self.business.supported_platforms
            )));
        }
        Ok(())
    }

    /// Whether the named feature is enabled; unknown names are disabled
    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.is_enabled_by_name(name)
    }

    /// Typed variant of [`Self::has_feature`]
    #[must_use]
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.features.is_enabled(feature)
    }

    /// Up to two uppercase initials of the display name, for avatar chrome
    #[must_use]
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}
