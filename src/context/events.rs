// ABOUTME: In-process tenant change notifications broadcast by the context manager
// ABOUTME: TenantChanged carries the new key, its configuration and what caused the change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{TenantConfig, TenantKey};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// What moved the active tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// Local `switch` call
    Switch,
    /// Selection made in another context
    External,
    /// Persisted selection re-read by `refresh`
    Refresh,
}

impl fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Switch => "switch",
            Self::External => "external",
            Self::Refresh => "refresh",
        };
        f.write_str(name)
    }
}

/// Broadcast after every tenant change
#[derive(Debug, Clone, Serialize)]
pub struct TenantChanged {
    /// New active tenant
    pub client: TenantKey,
    /// Its configuration
    pub config: Arc<TenantConfig>,
    /// What caused the change
    pub source: ChangeSource,
    /// Epoch of the state that was published
    pub epoch: u64,
}
