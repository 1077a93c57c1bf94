// ABOUTME: Dashboard shell CLI - inspect tenants and manage the persisted tenant selection
// ABOUTME: Lists tenants, switches the active tenant, prints routed URLs and watches external changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List registered tenants
//! dashboard-shell tenants list
//!
//! # Switch the active tenant
//! dashboard-shell switch samsonite
//!
//! # Feature flags of the active tenant
//! dashboard-shell features
//!
//! # Routed URL for an endpoint
//! dashboard-shell url keyword --param platform=Amazon
//!
//! # Follow selections made by other processes
//! dashboard-shell watch
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard_shell::config::{SelectionStoreKind, ShellConfig};
use dashboard_shell::context::{ShellContext, TokioReloadScheduler};
use dashboard_shell::logging::LoggingConfig;
use dashboard_shell::models::TenantKey;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "dashboard-shell",
    about = "Multi-tenant dashboard shell CLI",
    long_about = "Inspect tenant configurations, switch the persisted tenant selection and print tenant-routed API URLs."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Selection file override (implies the file store)
    #[arg(long, global = true)]
    store_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Tenant registry commands
    Tenants {
        #[command(subcommand)]
        action: TenantsCommand,
    },

    /// Show the active tenant
    Current,

    /// Make a tenant active
    Switch {
        /// Tenant key (case-insensitive)
        key: String,
    },

    /// Show feature flags
    Features {
        /// Tenant to inspect instead of the active one
        #[arg(long)]
        tenant: Option<String>,
    },

    /// Print the routed URL of an endpoint
    Url {
        /// Endpoint name, e.g. `keyword` or `goals-add`
        endpoint: String,

        /// Tenant to route for instead of the active one
        #[arg(long)]
        tenant: Option<String>,

        /// Query parameter as `key=value`; repeatable, order is kept
        #[arg(long = "param", value_parser = helpers::parse_param)]
        params: Vec<(String, String)>,
    },

    /// Print tenant changes made by other processes until interrupted
    Watch,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum TenantsCommand {
    /// List registered tenants in declaration order
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one tenant's full configuration
    Show {
        /// Tenant key
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = ShellConfig::from_env()?;
    if let Some(path) = cli.store_file {
        config.selection_store = SelectionStoreKind::File;
        config.selection_file = Some(path);
    }

    let reload = Arc::new(TokioReloadScheduler::new(Arc::new(|tenant: &TenantKey| {
        info!(%tenant, "Tenant-scoped state reloaded");
    })));
    let shell = ShellContext::bootstrap(config, reload)?;

    match cli.command {
        Command::Tenants { action } => match action {
            TenantsCommand::List { json } => commands::tenants::list(&shell, json)?,
            TenantsCommand::Show { key } => commands::tenants::show(&shell, &key)?,
        },
        Command::Current => commands::selection::current(&shell),
        Command::Switch { key } => commands::selection::switch(&shell, &key)?,
        Command::Features { tenant } => commands::selection::features(&shell, tenant.as_deref()),
        Command::Url {
            endpoint,
            tenant,
            params,
        } => commands::url::print(&shell, &endpoint, tenant.as_deref(), &params),
        Command::Watch => commands::selection::watch(&shell).await?,
    }

    Ok(())
}
