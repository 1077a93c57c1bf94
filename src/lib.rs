// ABOUTME: Main library entry point for the multi-tenant dashboard shell
// ABOUTME: Tenant registry, selection persistence, tenant-aware API routing and context management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Dashboard Shell
//!
//! Client-context subsystem of a multi-tenant analytics dashboard. One
//! deployment serves several business clients (tenants); this crate decides
//! which tenant is active, exposes its configuration and feature flags,
//! persists the choice across restarts and execution contexts, and routes API
//! calls to the tenant's namespace.
//!
//! ## Architecture
//!
//! - **Tenant**: immutable registry of tenant configurations
//! - **Persistence**: selected-tenant store shared between contexts
//! - **Routing**: tenant-scoped and tenant-agnostic API URLs
//! - **Context**: active tenant state machine and dependency wiring
//! - **Cache**: tenant-scoped LRU cache keyed by tenant epoch
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dashboard_shell::context::{SwitchOptions, TenantContextManager};
//! use dashboard_shell::persistence::SharedStorage;
//! use dashboard_shell::routing::{endpoints, ApiRouter};
//! use dashboard_shell::tenant::TenantRegistry;
//! use std::sync::Arc;
//!
//! let storage = SharedStorage::new();
//! let manager = TenantContextManager::builder(
//!     Arc::new(TenantRegistry::builtin()),
//!     Arc::new(storage.open_context()),
//! )
//! .build();
//!
//! manager.switch("samsonite", SwitchOptions::without_reload());
//! assert!(manager.has_feature("negativeKeywords"));
//!
//! let router = ApiRouter::default();
//! let url = router.build_url(endpoints::KEYWORDS, manager.current_key().as_str());
//! assert!(url.ends_with("/samsonite/keyword"));
//! ```

/// Tenant-scoped response cache
pub mod cache;

/// Environment configuration
pub mod config;

/// Application constants and environment variable names
pub mod constants;

/// Active tenant management and dependency wiring
pub mod context;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Tenant configuration data model
pub mod models;

/// Selected tenant persistence
pub mod persistence;

/// Tenant-aware API routing
pub mod routing;

/// Tenant registry and built-in tenants
pub mod tenant;
