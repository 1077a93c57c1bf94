// ABOUTME: Integration tests for the file backed selection store
// ABOUTME: Persistence across handles, external change detection, echo suppression and manager wiring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use dashboard_shell::context::{SwitchOptions, TenantContextManager};
use dashboard_shell::errors::ErrorCode;
use dashboard_shell::persistence::{FileSelectionStore, SelectionStore};
use dashboard_shell::tenant::TenantRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FileSelectionStore {
    FileSelectionStore::new(dir.path().join("nested").join("selection.json"))
}

#[test]
fn test_missing_file_reads_as_nothing_selected() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.read_selected().unwrap(), None);
    assert!(!store.poll_once().unwrap());
}

#[test]
fn test_write_creates_parents_and_persists_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.write_selected("samsonite").unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    let document: BTreeMap<String, String> = serde_json::from_str(&contents).unwrap();
    assert_eq!(document["selectedClient"], "samsonite");
    assert!(!store.path().with_extension("json.tmp").exists());

    let reopened = store_in(&dir);
    assert_eq!(reopened.read_selected().unwrap().as_deref(), Some("samsonite"));
}

#[test]
fn test_other_entries_survive_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"theme": "dark"}"#).unwrap();

    store.write_selected("bunge").unwrap();

    let document: BTreeMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(document["theme"], "dark");
    assert_eq!(document["selectedClient"], "bunge");
}

#[test]
fn test_corrupt_file_is_reported_then_replaced_by_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"selectedClient": "bun"#).unwrap();

    let err = store.read_selected().unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);

    store.write_selected("gcpl").unwrap();
    assert_eq!(store.read_selected().unwrap().as_deref(), Some("gcpl"));
}

#[test]
fn test_non_string_values_do_not_block_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(
        store.path(),
        r#"{"selectedClient": 5, "layout": {"columns": 2}, "theme": "dark"}"#,
    )
    .unwrap();

    assert_eq!(store.read_selected().unwrap(), None);

    store.write_selected("samsonite").unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(document["selectedClient"], "samsonite");
    assert_eq!(document["layout"]["columns"], 2);
    assert_eq!(document["theme"], "dark");
}

#[test]
fn test_manager_switches_away_from_malformed_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selection.json");
    std::fs::write(&path, r#"{"selectedClient": 5}"#).unwrap();
    let store = Arc::new(FileSelectionStore::new(&path));
    let manager = TenantContextManager::builder(
        Arc::new(TenantRegistry::builtin()),
        Arc::clone(&store) as Arc<dyn SelectionStore>,
    )
    .build();
    assert_eq!(manager.current_key(), "gcpl");

    let outcome = manager.switch("samsonite", SwitchOptions::without_reload());

    assert!(outcome.is_switched(), "{outcome:?}");
    assert_eq!(manager.current_key(), "samsonite");
    assert!(manager.state().last_error().is_none());
    assert_eq!(store.read_selected().unwrap().as_deref(), Some("samsonite"));
}

#[test]
fn test_poll_reports_other_writers_but_not_own_writes() {
    let dir = tempfile::tempdir().unwrap();
    let ours = store_in(&dir);
    let theirs = store_in(&dir);
    let mut changes = ours.subscribe_external();

    ours.write_selected("samsonite").unwrap();
    assert!(!ours.poll_once().unwrap());
    assert!(changes.try_recv().is_none());

    theirs.write_selected("bunge").unwrap();
    assert!(ours.poll_once().unwrap());
    let event = changes.try_recv().unwrap();
    assert_eq!(event.key, "selectedClient");
    assert_eq!(event.new_value.as_deref(), Some("bunge"));
    assert!(event.origin.is_unknown());

    // Same value again is not a new change
    assert!(!ours.poll_once().unwrap());
}

#[test]
fn test_removed_file_reports_cleared_selection() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.write_selected("bowlers").unwrap();
    let mut changes = store.subscribe_external();

    std::fs::remove_file(store.path()).unwrap();

    assert!(store.poll_once().unwrap());
    assert_eq!(changes.try_recv().unwrap().new_value, None);
}

#[tokio::test]
async fn test_watcher_drives_manager_to_external_selection() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selection.json");
    let store = Arc::new(FileSelectionStore::new(&path));
    let manager = Arc::new(
        TenantContextManager::builder(
            Arc::new(TenantRegistry::builtin()),
            Arc::clone(&store) as Arc<dyn SelectionStore>,
        )
        .build(),
    );
    manager.spawn_external_listener().unwrap();
    let watcher = store.spawn_watcher(Duration::from_millis(10)).unwrap();
    let mut changes = manager.subscribe_changes();

    FileSelectionStore::new(&path).write_selected("bunge").unwrap();

    let change = tokio::time::timeout(Duration::from_secs(2), changes.recv())
        .await
        .expect("watcher did not report the change")
        .unwrap();
    assert_eq!(change.client, "bunge");
    assert_eq!(manager.current_key(), "bunge");

    watcher.abort();
    manager.shutdown();
}

#[tokio::test]
async fn test_own_switch_is_not_echoed_by_watcher() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSelectionStore::new(dir.path().join("selection.json")));
    let manager = Arc::new(
        TenantContextManager::builder(
            Arc::new(TenantRegistry::builtin()),
            Arc::clone(&store) as Arc<dyn SelectionStore>,
        )
        .build(),
    );
    manager.spawn_external_listener().unwrap();
    let watcher = store.spawn_watcher(Duration::from_millis(10)).unwrap();

    manager.switch("samsonite", SwitchOptions::without_reload());
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(manager.state().epoch(), 1);
    assert_eq!(store.read_selected().unwrap().as_deref(), Some("samsonite"));

    watcher.abort();
    manager.shutdown();
}
