// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Tenant registry commands for the dashboard-shell CLI
// ABOUTME: Lists registered tenants and prints one tenant's configuration

use crate::helpers::display::display_tenant_table;
use anyhow::{anyhow, Result};
use dashboard_shell::context::ShellContext;

pub fn list(shell: &ShellContext, json: bool) -> Result<()> {
    let options = shell.manager().available_tenants();
    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        let active = shell.manager().current_key();
        display_tenant_table(&options, active.as_str());
    }
    Ok(())
}

pub fn show(shell: &ShellContext, key: &str) -> Result<()> {
    let config = shell
        .registry()
        .get(key)
        .ok_or_else(|| anyhow!("tenant '{key}' is not registered"))?;
    println!("{}", serde_json::to_string_pretty(config.as_ref())?);
    Ok(())
}
