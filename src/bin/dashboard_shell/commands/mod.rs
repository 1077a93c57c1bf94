// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Command modules for the dashboard-shell CLI
// ABOUTME: Tenant registry, active selection and URL routing commands

pub mod selection;
pub mod tenants;
pub mod url;
