// ABOUTME: API routing helper building tenant-scoped and tenant-agnostic request URLs
// ABOUTME: Endpoint name constants, auth URLs and the optional reqwest-backed API client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # API Routing
//!
//! URL layout:
//! - `{base}/{tenant}/{endpoint}` for tenant-scoped endpoints
//! - `{base}/app/{endpoint}` for the fixed tenant-agnostic set
//! - `{base}/csrfToken/`, `{base}/login/`, `{base}/app/register/` for auth
//!
//! [`ApiRouter`] is pure: the same inputs always produce the same URL.

/// Tenant-routed HTTP request builder
#[cfg(feature = "http-client")]
pub mod client;

#[cfg(feature = "http-client")]
pub use client::ApiClient;

use crate::constants::api::{
    APP_NAMESPACE, CSRF_TOKEN_PATH, DEFAULT_API_BASE_URL, LOGIN_PATH, REGISTER_PATH,
    TENANT_AGNOSTIC_ENDPOINTS,
};
use crate::models::TenantKey;
use url::form_urlencoded;

/// Endpoint names understood by the dashboard API
pub mod endpoints {
    // Authentication
    /// Sign in
    pub const LOGIN: &str = "login";
    /// Create an account
    pub const REGISTER: &str = "register";

    // Wallet & Balance
    /// Advertising wallet balance
    pub const WALLET_BALANCE: &str = "wallet_balance";

    // Performance Overview
    /// Campaign table
    pub const CAMPAIGNS: &str = "campaign";
    /// Campaign trend series
    pub const CAMPAIGN_GRAPH: &str = "campaign_graph";
    /// Start or pause a campaign
    pub const CAMPAIGN_PLAY_PAUSE: &str = "campaign-play-pause";
    /// Ad group table
    pub const ADGROUPS: &str = "adgroups";
    /// Start or pause an ad group
    pub const TOGGLE_AD_GROUP: &str = "toggle_ad_group";
    /// Rename an ad group
    pub const UPDATE_AD_GROUP_NAME: &str = "update_ad_group_name";
    /// Keyword table
    pub const KEYWORDS: &str = "keyword";
    /// Keyword trend series
    pub const KEYWORD_GRAPH: &str = "keyword_graph";
    /// Start or pause a keyword or target
    pub const TOGGLE_KEYWORD: &str = "toggle_keyword_or_target_state";
    /// Product table
    pub const PRODUCTS: &str = "product";
    /// Portfolio list
    pub const PORTFOLIOS: &str = "portfolios";
    /// Change a bid
    pub const UPDATE_BID: &str = "update_bid";
    /// Change a budget
    pub const BUDGET_CHANGE: &str = "budget-change";

    // Smart Control
    /// Automation rules
    pub const DISPLAY_RULES: &str = "displayrules";
    /// Edit a rule
    pub const UPDATE_RULE: &str = "update-rule";
    /// Start or pause a rule
    pub const PLAY_PAUSE_RULE: &str = "play-pause-rule";
    /// Delete a rule
    pub const DELETE_RULE: &str = "delete-rule";

    // Negative Keywords
    /// Negative keyword list
    pub const NEGATIVE_KEYWORD: &str = "negative_keyword";
    /// Add a negative keyword
    pub const ADD_NEGATIVE_KEYWORD: &str = "add_negative_keyword";
    /// Remove a negative keyword
    pub const DELETE_NEGATIVE_KEYWORD: &str = "delete_negative_keyword";

    // Analytics
    /// Product analytics report
    pub const PRODUCT_ANALYTICS: &str = "product-analytics";
    /// Search term insights report
    pub const SEARCH_TERM_INSIGHTS: &str = "keyword-search-term-page";

    // History
    /// Change history
    pub const HISTORY: &str = "history";

    // Goals (tenant-agnostic)
    /// Create a goal
    pub const GOALS_ADD: &str = "goals-add";
    /// Count of achieved goals
    pub const ACHIEVED_GOALS_COUNT: &str = "achieved-goals-count";
    /// Goal list
    pub const DISPLAY_GOALS: &str = "display-goals";
    /// Start or pause an Amazon product
    pub const AMAZON_PRODUCT_PLAY_PAUSE: &str = "amazon-product-play-pause";
}

/// Builds absolute API URLs for the active tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRouter {
    base_url: String,
}

impl ApiRouter {
    /// Router rooted at `base_url`; trailing separators are dropped
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without trailing separator
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether `endpoint` routes under the shared `app` namespace
    #[must_use]
    pub fn is_tenant_agnostic(endpoint: &str) -> bool {
        TENANT_AGNOSTIC_ENDPOINTS.contains(&strip_leading_separator(endpoint))
    }

    /// Base URL of one tenant's namespace
    #[must_use]
    pub fn tenant_base_url(&self, active_key: &str) -> String {
        format!("{}/{}", self.base_url, TenantKey::normalize(active_key))
    }

    /// Absolute URL of `endpoint` for the tenant `active_key`
    #[must_use]
    pub fn build_url(&self, endpoint: &str, active_key: &str) -> String {
        let endpoint = strip_leading_separator(endpoint);
        if TENANT_AGNOSTIC_ENDPOINTS.contains(&endpoint) {
            format!("{}/{APP_NAMESPACE}/{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.tenant_base_url(active_key))
        }
    }

    /// [`Self::build_url`] plus a form-encoded query string
    ///
    /// Parameters keep their given order. No `?` is appended when `params`
    /// is empty.
    #[must_use]
    pub fn build_url_with_params<I, K, V>(&self, endpoint: &str, active_key: &str, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.build_url(endpoint, active_key);
        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in params {
            query.append_pair(key.as_ref(), value.as_ref());
            any = true;
        }
        if any {
            url.push('?');
            url.push_str(&query.finish());
        }
        url
    }

    /// CSRF token endpoint
    #[must_use]
    pub fn csrf_token_url(&self) -> String {
        format!("{}/{CSRF_TOKEN_PATH}", self.base_url)
    }

    /// Login endpoint
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/{LOGIN_PATH}", self.base_url)
    }

    /// Registration endpoint
    #[must_use]
    pub fn register_url(&self) -> String {
        format!("{}/{REGISTER_PATH}", self.base_url)
    }
}

impl Default for ApiRouter {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn strip_leading_separator(endpoint: &str) -> &str {
    endpoint.strip_prefix('/').unwrap_or(endpoint)
}
