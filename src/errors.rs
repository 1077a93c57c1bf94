// ABOUTME: Re-exports the unified error types from dashboard-shell-core
// ABOUTME: Keeps `crate::errors::*` paths stable for the root crate and its binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling, see [`dashboard_shell_core::errors`].

pub use dashboard_shell_core::errors::{AppError, AppResult, ErrorCode};
