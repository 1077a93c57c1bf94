// ABOUTME: Configuration module for the dashboard shell
// ABOUTME: Environment-driven settings for API routing, tenant defaults and selection persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! All settings come from environment variables; see
//! [`crate::constants::env_vars`] for the names.

/// Environment variable parsing and validation
pub mod environment;

pub use environment::{Environment, SelectionStoreKind, ShellConfig};
