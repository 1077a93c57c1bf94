// ABOUTME: Tenant context layer: active tenant state, transitions and dependency wiring
// ABOUTME: Context manager, published state, change events, reload policy, branding side channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tenant context
//!
//! # Architecture
//!
//! - [`TenantContextManager`]: owns the active tenant of one execution context
//! - [`ActiveTenantState`]: snapshot published on every transition
//! - [`TenantChanged`]: in-process change notification
//! - [`ReloadScheduler`]: full reload policy after a switch
//! - [`BrandingSink`]: title and icon side channel
//! - [`ShellContext`]: every dependency above built from configuration
//!
//! There is no global active tenant: consumers receive an
//! `Arc<TenantContextManager>` explicitly.

/// Title and icon side channel
pub mod branding;
/// Tenant change notifications
pub mod events;
/// Context manager and its builder
pub mod manager;
/// Deferred reload policy
pub mod reload;
/// Dependency wiring from configuration
pub mod shell;
/// Published active tenant state
pub mod state;

pub use branding::{BrandingSink, BrandingUpdate, TracingBrandingSink};
pub use events::{ChangeSource, TenantChanged};
pub use manager::{
    ContextOptions, SwitchOptions, SwitchOutcome, TenantContextManager,
    TenantContextManagerBuilder,
};
pub use reload::{NoReload, ReloadHandler, ReloadScheduler, TokioReloadScheduler};
pub use shell::{BackgroundTasks, ShellContext};
pub use state::{ActiveTenantState, CacheScope, SwitchPhase};
