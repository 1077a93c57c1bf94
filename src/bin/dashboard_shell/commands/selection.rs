// ABOUTME: Active tenant commands for the dashboard-shell CLI
// ABOUTME: Shows, switches and watches the persisted tenant selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::{display_active_tenant, display_change, display_features};
use anyhow::{bail, Result};
use dashboard_shell::context::{ShellContext, SwitchOptions, SwitchOutcome};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

pub fn current(shell: &ShellContext) {
    display_active_tenant(&shell.manager().state());
}

pub fn switch(shell: &ShellContext, key: &str) -> Result<()> {
    if !shell.registry().is_registered(key) {
        warn!(
            requested = %key,
            fallback = %shell.registry().default_key(),
            "Tenant not registered, switching to default"
        );
    }

    // The process exits right after, so there is nothing to reload
    match shell.manager().switch(key, SwitchOptions::without_reload()) {
        SwitchOutcome::Switched { from, to } => println!("Switched {from} -> {to}"),
        SwitchOutcome::Unchanged { key } => println!("Already on {key}"),
        SwitchOutcome::Failed { message, .. } => bail!(message),
    }
    Ok(())
}

pub fn features(shell: &ShellContext, tenant: Option<&str>) {
    let config = tenant.map_or_else(
        || shell.manager().current_config(),
        |key| shell.registry().lookup(key),
    );
    display_features(&config);
}

pub async fn watch(shell: &ShellContext) -> Result<()> {
    let tasks = shell.start_background_tasks()?;
    let mut changes = shell.manager().subscribe_changes();
    println!(
        "Watching tenant selection (active: {}), Ctrl-C to stop",
        shell.manager().current_key()
    );

    loop {
        tokio::select! {
            change = changes.recv() => match change {
                Ok(change) => display_change(&change),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Missed tenant changes"),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    tasks.shutdown();
    Ok(())
}
