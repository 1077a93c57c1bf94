// ABOUTME: Closed set of dashboard feature flags and the per-tenant flag map
// ABOUTME: Unknown feature names always resolve to disabled instead of erroring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Dashboard capability that can be switched on or off per tenant
///
/// Serialized names match the camelCase identifiers used by the dashboard
/// front end (`adGroups`, `negativeKeywords`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    /// Campaign management
    Campaigns,
    /// Keyword management
    Keywords,
    /// Product management
    Products,
    /// Ad group management
    AdGroups,
    /// Rule based automation
    SmartControl,
    /// Negative keyword management
    NegativeKeywords,
    /// Analytics reports
    Analytics,
    /// Per-product analytics
    ProductAnalytics,
    /// Search term insights
    SearchTermInsights,
    /// Budget editing
    BudgetManagement,
    /// Bid editing
    BidManagement,
    /// Portfolio grouping
    Portfolios,
    /// Goal tracking
    Goals,
    /// Change history
    History,
}

impl Feature {
    /// Every recognized feature, in dashboard display order
    pub const ALL: [Self; 14] = [
        Self::Campaigns,
        Self::Keywords,
        Self::Products,
        Self::AdGroups,
        Self::SmartControl,
        Self::NegativeKeywords,
        Self::Analytics,
        Self::ProductAnalytics,
        Self::SearchTermInsights,
        Self::BudgetManagement,
        Self::BidManagement,
        Self::Portfolios,
        Self::Goals,
        Self::History,
    ];

    /// Wire name of the feature
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Campaigns => "campaigns",
            Self::Keywords => "keywords",
            Self::Products => "products",
            Self::AdGroups => "adGroups",
            Self::SmartControl => "smartControl",
            Self::NegativeKeywords => "negativeKeywords",
            Self::Analytics => "analytics",
            Self::ProductAnalytics => "productAnalytics",
            Self::SearchTermInsights => "searchTermInsights",
            Self::BudgetManagement => "budgetManagement",
            Self::BidManagement => "bidManagement",
            Self::Portfolios => "portfolios",
            Self::Goals => "goals",
            Self::History => "history",
        }
    }

    /// Human-readable label shown on the dashboard overview
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Campaigns => "Campaigns Management",
            Self::Keywords => "Keywords Management",
            Self::Products => "Products Management",
            Self::AdGroups => "Ad Groups Management",
            Self::SmartControl => "Smart Control Rules",
            Self::NegativeKeywords => "Negative Keywords",
            Self::Analytics => "Analytics Dashboard",
            Self::ProductAnalytics => "Product Analytics",
            Self::SearchTermInsights => "Search Term Insights",
            Self::BudgetManagement => "Budget Management",
            Self::BidManagement => "Bid Management",
            Self::Portfolios => "Portfolios Management",
            Self::Goals => "Goals Tracking",
            Self::History => "History & Reports",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown feature: {s}")))
    }
}

/// Per-tenant feature flag map
///
/// Features missing from the map are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeMap<Feature, bool>);

impl FeatureFlags {
    /// Flag map with every recognized feature enabled
    #[must_use]
    pub fn all_enabled() -> Self {
        Self(Feature::ALL.into_iter().map(|f| (f, true)).collect())
    }

    /// Builder-style override of a single flag
    #[must_use]
    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.0.insert(feature, enabled);
        self
    }

    /// Whether `feature` is enabled
    #[must_use]
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.0.get(&feature).copied().unwrap_or(false)
    }

    /// Whether the feature named `name` is enabled; unknown names are disabled
    #[must_use]
    pub fn is_enabled_by_name(&self, name: &str) -> bool {
        name.parse::<Feature>()
            .is_ok_and(|feature| self.is_enabled(feature))
    }

    /// Enabled features in display order
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(|f| self.is_enabled(*f))
    }

    /// `(feature, enabled)` pairs for every recognized feature
    pub fn iter(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        Feature::ALL.into_iter().map(|f| (f, self.is_enabled(f)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_round_trip_through_from_str() {
        for feature in Feature::ALL {
            assert_eq!(feature.as_str().parse::<Feature>().ok(), Some(feature));
        }
    }

    #[test]
    fn test_unknown_feature_is_disabled() {
        let flags = FeatureFlags::all_enabled();
        assert!(flags.is_enabled_by_name("campaigns"));
        assert!(!flags.is_enabled_by_name("teleportation"));
        assert!(!flags.is_enabled_by_name("Campaigns"));
    }

    #[test]
    fn test_missing_flag_defaults_to_disabled() {
        let flags = FeatureFlags::default().with(Feature::Goals, true);
        assert!(flags.is_enabled(Feature::Goals));
        assert!(!flags.is_enabled(Feature::History));
        assert_eq!(flags.enabled().collect::<Vec<_>>(), vec![Feature::Goals]);
    }

    #[test]
    fn test_flags_serialize_as_camel_case_map() {
        let flags = FeatureFlags::default().with(Feature::NegativeKeywords, false);
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"{"negativeKeywords":false}"#);
    }
}
