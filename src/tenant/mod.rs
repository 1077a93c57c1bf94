// ABOUTME: Multi-tenant registry mapping tenant keys to immutable configuration records
// ABOUTME: Provides lookup with default fallback, declaration-ordered listing and built-in tenants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tenant Registry
//!
//! Static mapping from tenant key to its [`TenantConfig`]:
//! - Keys are normalized (trimmed, lowercased) before every lookup
//! - Unknown keys resolve to the default tenant; a lookup never fails
//! - Listing preserves declaration order, which reflects business priority

/// Built-in tenant configuration literals
pub mod builtin;
/// Registry implementation
pub mod registry;

pub use registry::{TenantEntry, TenantOption, TenantRegistry, TenantTable};
