// ABOUTME: Core types and constants for the multi-tenant dashboard shell
// ABOUTME: Foundation crate with error handling, tenant configuration model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Dashboard Shell Core
//!
//! Foundation crate providing shared types and constants for the dashboard
//! shell. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **constants**: Storage keys, default tenant, API namespaces and timings
//! - **models**: Immutable tenant configuration records and the feature flag set

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Tenant configuration data model (`TenantConfig`, `Feature`, `TenantKey`)
pub mod models;
