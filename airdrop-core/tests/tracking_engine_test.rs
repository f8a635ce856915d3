//! End-to-end behaviour of the tracking engine over both store implementations

mod common;

use airdrop_core::catalog::Catalog;
use airdrop_core::tracking::{
    FileTrackingStore, MemoryTrackingStore, TrackingEngine, TrackingStore, TrackingUpdate,
    FREE_TIER_CAP,
};
use airdrop_core::TrackError;
use common::{init_test_logging, numbered_catalog, polymarket_catalog};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn tracked_ids<S: TrackingStore>(engine: &TrackingEngine<S>) -> BTreeSet<String> {
    engine
        .records()
        .into_iter()
        .map(|r| r.airdrop_id)
        .collect()
}

#[test]
fn test_polymarket_lifecycle_on_disk() {
    init_test_logging();
    let temp_dir = TempDir::new().unwrap();
    let ledger_path = temp_dir.path().join("tracking.json");
    let mut engine = TrackingEngine::new(
        polymarket_catalog(),
        FileTrackingStore::new(&ledger_path),
    );

    let outcome = engine.track("polymarket", "farming").unwrap();
    assert_eq!(outcome.airdrop.id, "poly");
    assert_eq!(outcome.airdrop.name, "Polymarket");

    let err = engine.track("polymarket", "farming").unwrap_err();
    assert!(matches!(err, TrackError::AlreadyTracked { .. }));
    assert_eq!(err.to_string(), "Already tracking Polymarket");

    let outcome = engine
        .update("poly", &TrackingUpdate::progress(50))
        .unwrap();
    assert_eq!(outcome.record.progress, 50);
    assert!(outcome.record.updated_at.is_some());

    // What was persisted matches what was returned
    let stored = engine.records();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].progress, 50);
    assert_eq!(stored[0].status, "farming");
    assert!(stored[0].updated_at.is_some());

    engine.untrack("POLY").unwrap();
    assert!(engine.records().is_empty());

    let err = engine.untrack("poly").unwrap_err();
    assert!(matches!(err, TrackError::NotTracked { .. }));

    // The file is the wholesale ledger document
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&ledger_path).unwrap()).unwrap();
    assert!(raw["lastUpdated"].is_string());
    assert_eq!(raw["tracking"], serde_json::json!([]));
}

#[test]
fn test_track_then_untrack_restores_id_set() {
    init_test_logging();
    let mut engine = TrackingEngine::new(numbered_catalog(4), MemoryTrackingStore::new());
    engine.track("project-00", "farming").unwrap();
    engine.track("project-01", "interested").unwrap();

    let before = tracked_ids(&engine);
    engine.track("project-03", "farming").unwrap();
    engine.untrack("project-03").unwrap();

    assert_eq!(tracked_ids(&engine), before);
}

#[test]
fn test_capacity_refuses_eleventh_airdrop() {
    init_test_logging();
    let mut engine = TrackingEngine::new(numbered_catalog(12), MemoryTrackingStore::new());

    // Track out of catalog order to show order does not matter
    for i in (0..FREE_TIER_CAP).rev() {
        engine.track(&format!("project-{i:02}"), "farming").unwrap();
    }
    let before = engine.records();
    assert_eq!(before.len(), FREE_TIER_CAP);

    let err = engine.track("project-10", "farming").unwrap_err();
    assert!(matches!(err, TrackError::CapacityExceeded { cap: 10 }));
    assert_eq!(engine.records(), before);

    // Freeing a slot makes room again
    engine.untrack("project-00").unwrap();
    engine.track("project-10", "farming").unwrap();
    assert_eq!(engine.records().len(), FREE_TIER_CAP);
}

#[test]
fn test_duplicate_check_runs_before_capacity_check() {
    let mut engine = TrackingEngine::new(numbered_catalog(10), MemoryTrackingStore::new());
    for i in 0..FREE_TIER_CAP {
        engine.track(&format!("project-{i:02}"), "farming").unwrap();
    }

    let err = engine.track("project-05", "farming").unwrap_err();
    assert!(matches!(err, TrackError::AlreadyTracked { .. }));
}

#[test]
fn test_update_on_untracked_never_creates_a_record() {
    let mut engine = TrackingEngine::new(polymarket_catalog(), MemoryTrackingStore::new());

    let update = TrackingUpdate::progress(80).with_status("completed");
    let err = engine.update("poly", &update).unwrap_err();
    assert!(matches!(err, TrackError::NotTracked { .. }));

    let err = engine.update("poly", &update).unwrap_err();
    assert!(matches!(err, TrackError::NotTracked { .. }));

    assert!(engine.records().is_empty());
    assert_eq!(engine.store().save_count(), 0);
}

#[test]
fn test_update_merges_only_supplied_fields() {
    let mut engine = TrackingEngine::new(polymarket_catalog(), MemoryTrackingStore::new());
    let added = engine.track("poly", "farming").unwrap().record.added_at;

    engine.update("poly", &TrackingUpdate::progress(30)).unwrap();
    let outcome = engine
        .update("Polymarket", &TrackingUpdate::status("completed"))
        .unwrap();

    assert_eq!(outcome.record.progress, 30);
    assert_eq!(outcome.record.status, "completed");
    assert_eq!(outcome.record.added_at, added);
}

#[test]
fn test_every_operation_reloads_the_ledger() {
    let temp_dir = TempDir::new().unwrap();
    let ledger_path = temp_dir.path().join("tracking.json");

    let mut first = TrackingEngine::new(polymarket_catalog(), FileTrackingStore::new(&ledger_path));
    let mut second =
        TrackingEngine::new(polymarket_catalog(), FileTrackingStore::new(&ledger_path));

    first.track("poly", "farming").unwrap();

    // A second handle on the same file sees the change without restarting
    let err = second.track("poly", "farming").unwrap_err();
    assert!(matches!(err, TrackError::AlreadyTracked { .. }));
    second.untrack("poly").unwrap();

    assert!(first.records().is_empty());
}

#[test]
fn test_unknown_ledger_keys_survive_a_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    let ledger_path = temp_dir.path().join("tracking.json");
    std::fs::write(
        &ledger_path,
        r#"{
            "lastUpdated": "2025-01-01T00:00:00Z",
            "tracking": [
                { "airdropId": "poly", "status": "farming", "progress": 10,
                  "tasksCompleted": ["deposit"], "notes": "weekly", "wallet": "0xabc",
                  "addedAt": "2025-01-01T00:00:00Z" }
            ]
        }"#,
    )
    .unwrap();

    let mut engine = TrackingEngine::new(polymarket_catalog(), FileTrackingStore::new(&ledger_path));
    engine.update("poly", &TrackingUpdate::progress(20)).unwrap();

    let record = &engine.records()[0];
    assert_eq!(record.progress, 20);
    assert_eq!(record.tasks_completed, vec!["deposit".to_string()]);
    assert_eq!(record.notes, "weekly");
    assert_eq!(record.extra["wallet"], "0xabc");
}

#[test]
fn test_corrupt_ledger_is_treated_as_empty() {
    init_test_logging();
    let temp_dir = TempDir::new().unwrap();
    let ledger_path = temp_dir.path().join("tracking.json");
    std::fs::write(&ledger_path, "{ broken").unwrap();

    let mut engine = TrackingEngine::new(polymarket_catalog(), FileTrackingStore::new(&ledger_path));
    assert!(engine.records().is_empty());
    assert_eq!(engine.stats().count, 0);

    engine.track("poly", "farming").unwrap();
    assert_eq!(engine.records().len(), 1);
}

#[test]
fn test_empty_catalog_misses_everything() {
    let mut engine = TrackingEngine::new(Catalog::default(), MemoryTrackingStore::new());

    assert!(matches!(
        engine.track("poly", "farming"),
        Err(TrackError::NotFound { .. })
    ));
    assert!(matches!(
        engine.untrack("poly"),
        Err(TrackError::NotFound { .. })
    ));
    assert!(matches!(
        engine.update("poly", &TrackingUpdate::progress(1)),
        Err(TrackError::NotFound { .. })
    ));
    assert_eq!(engine.stats().count, 0);
}

#[test]
fn test_stats_over_tracked_airdrops() {
    let mut engine = TrackingEngine::new(polymarket_catalog(), MemoryTrackingStore::new());
    engine.track("poly", "farming").unwrap();

    let stats = engine.stats();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.by_status.get("farming"), Some(&1));
    assert_eq!(stats.total_value_min, 100.0);
    assert_eq!(stats.total_value_max, 500.0);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["byStatus"]["farming"], 1);
    assert_eq!(json["totalValueMax"], 500.0);
}
