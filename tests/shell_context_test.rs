// ABOUTME: End-to-end tests for the bootstrapped shell context
// ABOUTME: Two shells sharing a selection file, deferred reloads and tenant-scoped caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use dashboard_shell::cache::TenantScopedCache;
use dashboard_shell::config::{SelectionStoreKind, ShellConfig};
use dashboard_shell::context::{
    NoReload, ReloadScheduler, ShellContext, SwitchOptions, TokioReloadScheduler,
};
use dashboard_shell::models::TenantKey;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn file_config(path: &Path) -> ShellConfig {
    ShellConfig {
        api_base_url: "https://api.example.test".into(),
        selection_store: SelectionStoreKind::File,
        selection_file: Some(path.to_path_buf()),
        store_poll_interval: Duration::from_millis(10),
        ..ShellConfig::default()
    }
}

fn no_reload() -> Arc<dyn ReloadScheduler> {
    Arc::new(NoReload)
}

#[test]
fn test_memory_shell_starts_on_default() {
    common::init_test_logging();
    let config = ShellConfig {
        selection_store: SelectionStoreKind::Memory,
        ..ShellConfig::default()
    };
    let shell = ShellContext::bootstrap(config, no_reload()).unwrap();

    assert_eq!(shell.manager().current_key(), "gcpl");
    assert!(shell.file_store().is_none());
    assert_eq!(shell.registry().len(), 4);
}

#[test]
fn test_selection_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selection.json");

    let first = ShellContext::bootstrap(file_config(&path), no_reload()).unwrap();
    assert!(first
        .manager()
        .switch("Samsonite", SwitchOptions::without_reload())
        .is_switched());
    drop(first);

    let second = ShellContext::bootstrap(file_config(&path), no_reload()).unwrap();
    assert_eq!(second.manager().current_key(), "samsonite");
    assert_eq!(
        second.url_for("keyword", &[("platform".into(), "Amazon".into())]),
        "https://api.example.test/samsonite/keyword?platform=Amazon"
    );
    assert_eq!(
        second.url_for("/goals-add", &[]),
        "https://api.example.test/app/goals-add"
    );
}

#[test]
fn test_configured_default_tenant_applies_on_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ShellConfig {
        default_tenant: Some("bowlers".into()),
        ..file_config(&dir.path().join("selection.json"))
    };

    let shell = ShellContext::bootstrap(config, no_reload()).unwrap();

    assert_eq!(shell.manager().current_key(), "bowlers");
    assert!(!shell.manager().has_feature("negativeKeywords"));
}

#[tokio::test]
async fn test_shells_sharing_a_file_follow_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selection.json");
    let writer = ShellContext::bootstrap(file_config(&path), no_reload()).unwrap();
    let follower = ShellContext::bootstrap(file_config(&path), no_reload()).unwrap();
    let tasks = follower.start_background_tasks().unwrap();
    let mut changes = follower.manager().subscribe_changes();

    writer
        .manager()
        .switch("bunge", SwitchOptions::without_reload());

    let change = tokio::time::timeout(Duration::from_secs(2), changes.recv())
        .await
        .expect("follower did not observe the switch")
        .unwrap();
    assert_eq!(change.client, "bunge");
    assert_eq!(follower.manager().current_key(), "bunge");

    tasks.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_switch_schedules_one_deferred_reload() {
    let reloaded = Arc::new(Mutex::new(Vec::<TenantKey>::new()));
    let sink = Arc::clone(&reloaded);
    let scheduler = Arc::new(TokioReloadScheduler::new(Arc::new(
        move |tenant: &TenantKey| {
            sink.lock().unwrap().push(tenant.clone());
        },
    )));
    let config = ShellConfig {
        selection_store: SelectionStoreKind::Memory,
        ..ShellConfig::default()
    };
    let shell =
        ShellContext::bootstrap(config, Arc::clone(&scheduler) as Arc<dyn ReloadScheduler>)
            .unwrap();

    shell.manager().switch("samsonite", SwitchOptions::default());
    shell.manager().switch("bunge", SwitchOptions::default());
    assert!(scheduler.has_pending());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(reloaded.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(*reloaded.lock().unwrap(), vec![TenantKey::normalize("bunge")]);
    assert!(!scheduler.has_pending());
}

#[test]
fn test_cached_values_do_not_cross_tenants() {
    let config = ShellConfig {
        selection_store: SelectionStoreKind::Memory,
        ..ShellConfig::default()
    };
    let shell = ShellContext::bootstrap(config, no_reload()).unwrap();
    let cache = TenantScopedCache::<String>::new(16);

    let gcpl_scope = shell.manager().state().cache_scope();
    cache.insert(gcpl_scope.clone(), "wallet_balance", "1200".to_owned());
    assert_eq!(cache.get(&gcpl_scope, "wallet_balance").as_deref(), Some("1200"));

    shell
        .manager()
        .switch("samsonite", SwitchOptions::without_reload());
    let samsonite_scope = shell.manager().state().cache_scope();
    assert_ne!(gcpl_scope, samsonite_scope);
    assert_eq!(cache.get(&samsonite_scope, "wallet_balance"), None);
    assert!(cache.is_empty());

    // Switching back starts a new generation rather than reviving old data
    cache.insert(samsonite_scope, "wallet_balance", "80".to_owned());
    shell.manager().switch("gcpl", SwitchOptions::without_reload());
    let back = shell.manager().state().cache_scope();
    assert_ne!(back, gcpl_scope);
    assert_eq!(cache.purge_stale(&back), 1);
}

#[cfg(feature = "http-client")]
#[test]
fn test_api_client_shares_the_shell_manager() {
    let config = ShellConfig {
        selection_store: SelectionStoreKind::Memory,
        api_base_url: "https://api.example.test".into(),
        ..ShellConfig::default()
    };
    let shell = ShellContext::bootstrap(config, no_reload()).unwrap();
    let client = shell.api_client();

    shell.manager().switch("bowlers", SwitchOptions::without_reload());

    assert_eq!(
        client.url("campaign", Vec::<(&str, &str)>::new()),
        "https://api.example.test/bowlers/campaign"
    );
}
