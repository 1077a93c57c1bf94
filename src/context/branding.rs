// ABOUTME: Side channel that carries tenant branding to the host chrome after a change
// ABOUTME: BrandingSink trait, the document title and icon update, and a tracing-backed sink
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{TenantConfig, TenantKey};
use serde::Serialize;
use tracing::info;

/// Title, icon and color applied to the host chrome for one tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandingUpdate {
    /// Tenant the branding belongs to
    pub tenant: TenantKey,
    /// Window or document title
    pub title: String,
    /// Icon asset path
    pub favicon: String,
    /// Theme color
    pub primary_color: String,
}

impl From<&TenantConfig> for BrandingUpdate {
    fn from(config: &TenantConfig) -> Self {
        Self {
            tenant: config.key.clone(),
            title: config.display_name.clone(),
            favicon: config.branding.favicon.clone(),
            primary_color: config.branding.primary_color.clone(),
        }
    }
}

/// Receives branding updates; implementations must not block
pub trait BrandingSink: Send + Sync {
    /// Apply `update` to the host chrome
    fn apply(&self, update: &BrandingUpdate);
}

/// Sink that only logs the update
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBrandingSink;

impl BrandingSink for TracingBrandingSink {
    fn apply(&self, update: &BrandingUpdate) {
        info!(
            tenant = %update.tenant,
            title = %update.title,
            favicon = %update.favicon,
            "Applying tenant branding"
        );
    }
}
