// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates environment variable loading, defaults, validation and registry overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use dashboard_shell::config::environment::{Environment, SelectionStoreKind, ShellConfig};
use dashboard_shell::constants::env_vars;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ALL_VARS: [&str; 9] = [
    env_vars::API_BASE_URL,
    env_vars::DEFAULT_TENANT,
    env_vars::SELECTION_STORE,
    env_vars::SELECTION_FILE,
    env_vars::TENANTS_FILE,
    env_vars::RELOAD_DELAY_MS,
    env_vars::RELOAD_ON_EXTERNAL_CHANGE,
    env_vars::STORE_POLL_INTERVAL_MS,
    env_vars::ENVIRONMENT,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("staging"),
        Environment::Development
    ); // Default fallback
}

#[test]
fn test_selection_store_kind_parsing() {
    assert_eq!(
        " Memory ".parse::<SelectionStoreKind>().unwrap(),
        SelectionStoreKind::Memory
    );
    assert_eq!(
        "file".parse::<SelectionStoreKind>().unwrap(),
        SelectionStoreKind::File
    );
    assert!("redis".parse::<SelectionStoreKind>().is_err());
    assert_eq!(SelectionStoreKind::default().to_string(), "file");
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = ShellConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.api_base_url, "https://react-api-script.onrender.com");
    assert_eq!(config.selection_store, SelectionStoreKind::File);
    assert_eq!(config.reload_delay, Duration::from_millis(100));
    assert!(!config.reload_on_external_change);
    assert!(config.default_tenant.is_none());
    assert!(config.tenants_file.is_none());
}

#[test]
#[serial]
fn test_from_env_reads_every_variable() {
    clear_env();
    env::set_var(env_vars::API_BASE_URL, "http://localhost:8000/");
    env::set_var(env_vars::ENVIRONMENT, "testing");
    env::set_var(env_vars::DEFAULT_TENANT, "Bunge");
    env::set_var(env_vars::SELECTION_STORE, "memory");
    env::set_var(env_vars::SELECTION_FILE, "/tmp/shell/selection.json");
    env::set_var(env_vars::RELOAD_DELAY_MS, "250");
    env::set_var(env_vars::RELOAD_ON_EXTERNAL_CHANGE, "true");
    env::set_var(env_vars::STORE_POLL_INTERVAL_MS, "75");

    let config = ShellConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "http://localhost:8000");
    assert!(config.environment.is_testing());
    assert_eq!(config.default_tenant.as_deref(), Some("Bunge"));
    assert_eq!(config.selection_store, SelectionStoreKind::Memory);
    assert_eq!(
        config.selection_file_path().unwrap(),
        PathBuf::from("/tmp/shell/selection.json")
    );
    let options = config.context_options();
    assert_eq!(options.reload_delay, Duration::from_millis(250));
    assert!(options.reload_on_external_change);
    assert_eq!(config.store_poll_interval, Duration::from_millis(75));
}

#[test]
#[serial]
fn test_from_env_rejects_bad_values() {
    clear_env();
    env::set_var(env_vars::RELOAD_DELAY_MS, "soon");
    assert!(ShellConfig::from_env().is_err());

    clear_env();
    env::set_var(env_vars::SELECTION_STORE, "redis");
    assert!(ShellConfig::from_env().is_err());

    clear_env();
    env::set_var(env_vars::API_BASE_URL, "ftp://example.test");
    assert!(ShellConfig::from_env().is_err());

    clear_env();
    env::set_var(env_vars::STORE_POLL_INTERVAL_MS, "0");
    assert!(ShellConfig::from_env().is_err());

    clear_env();
}

#[test]
fn test_default_tenant_override() {
    let config = ShellConfig {
        default_tenant: Some("samsonite".into()),
        ..ShellConfig::default()
    };
    let registry = config.load_registry().unwrap();
    assert_eq!(registry.default_key(), &"samsonite");

    let unknown = ShellConfig {
        default_tenant: Some("acme".into()),
        ..ShellConfig::default()
    };
    assert_eq!(unknown.load_registry().unwrap().default_key(), &"gcpl");
}

#[test]
fn test_missing_tenants_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = ShellConfig {
        tenants_file: Some(dir.path().join("tenants.yaml")),
        ..ShellConfig::default()
    };
    assert!(config.load_registry().is_err());
}

#[test]
fn test_summary_mentions_store_and_delay() {
    let summary = ShellConfig::default().summary();
    assert!(summary.contains("store=file"));
    assert!(summary.contains("reload_delay=100ms"));
}
