// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for the JSON record store

use carbonprint_metrics::{Breakdown, CarbonResult};
use carbonprint_records::{AdvisoryContext, CarbonRecord, JsonRecordStore, RecordStore};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

fn result(transport: i64, energy: i64, consumption: i64) -> CarbonResult {
    CarbonResult {
        total: transport + energy + consumption,
        breakdown: Breakdown {
            transport,
            energy,
            consumption,
        },
    }
}

#[test]
fn test_append_and_reload() {
    let temp = TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());

    let record = CarbonRecord::new("alice", &result(1040, 1392, 1643));
    store.append(record.clone()).unwrap();

    // A second store over the same directory sees the record
    let reopened = JsonRecordStore::new(temp.path());
    let history = reopened.history("alice").unwrap();
    assert_eq!(history, vec![record]);
}

#[test]
fn test_history_is_oldest_first_and_per_user() {
    let temp = TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());

    let march = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let april = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();

    store
        .append(CarbonRecord::at("alice", &result(100, 100, 100), april))
        .unwrap();
    store
        .append(CarbonRecord::at("alice", &result(200, 200, 200), march))
        .unwrap();
    store
        .append(CarbonRecord::at("bob", &result(0, 0, 1643), march))
        .unwrap();

    let alice = store.history("alice").unwrap();
    assert_eq!(alice.len(), 2);
    assert_eq!(alice[0].created_at, march);
    assert_eq!(alice[1].total_emission, 300);

    assert_eq!(store.history("bob").unwrap().len(), 1);
    assert!(store.history("carol").unwrap().is_empty());
    assert_eq!(store.list_users().unwrap(), vec!["alice", "bob"]);
}

#[test]
fn test_similar_user_ids_keep_separate_histories() {
    let temp = TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());

    store
        .append(CarbonRecord::new("alice.smith", &result(100, 0, 0)))
        .unwrap();
    store
        .append(CarbonRecord::new("alice_smith", &result(0, 200, 0)))
        .unwrap();
    store
        .append(CarbonRecord::new("alice/smith", &result(0, 0, 300)))
        .unwrap();

    let dotted = store.history("alice.smith").unwrap();
    assert_eq!(dotted.len(), 1);
    assert_eq!(dotted[0].user_id, "alice.smith");
    assert_eq!(dotted[0].total_emission, 100);

    let underscored = store.history("alice_smith").unwrap();
    assert_eq!(underscored.len(), 1);
    assert_eq!(underscored[0].total_emission, 200);

    assert_eq!(store.prune("alice_smith", 0).unwrap(), 1);
    assert_eq!(store.history("alice.smith").unwrap().len(), 1);
    assert_eq!(store.history("alice/smith").unwrap().len(), 1);

    assert_eq!(
        store.list_users().unwrap(),
        vec!["alice.smith", "alice/smith", "alice_smith"]
    );
}

#[test]
fn test_foreign_records_in_a_user_file_are_ignored() {
    let temp = TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());
    store
        .append(CarbonRecord::new("grace", &result(1, 2, 3)))
        .unwrap();

    let path = temp.path().join("users").join("grace.json");
    let mut records: Vec<CarbonRecord> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    records.push(CarbonRecord::new("heidi", &result(9, 9, 9)));
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

    let history = store.history("grace").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user_id, "grace");
}

#[test]
fn test_prune_keeps_newest() {
    let temp = TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());

    for day in 1..=5 {
        let when = Utc.with_ymd_and_hms(2026, 5, day, 0, 0, 0).unwrap();
        store
            .append(CarbonRecord::at("dana", &result(day as i64, 0, 0), when))
            .unwrap();
    }

    assert_eq!(store.prune("dana", 2).unwrap(), 3);
    let history = store.history("dana").unwrap();
    let totals: Vec<_> = history.iter().map(|r| r.total_emission).collect();
    assert_eq!(totals, vec![4, 5]);

    assert_eq!(store.prune("dana", 10).unwrap(), 0);
}

#[test]
fn test_advisory_context_from_store() {
    let temp = TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());

    let when = Utc.with_ymd_and_hms(2026, 7, 20, 8, 0, 0).unwrap();
    store
        .append(CarbonRecord::at("erin", &result(500, 600, 1022), when))
        .unwrap();

    let history = store.history("erin").unwrap();
    let ctx = AdvisoryContext::from_history(&history).unwrap();
    assert_eq!(ctx.total, 2122);
    assert_eq!(ctx.history[0].date, "2026-07-20");

    let json = serde_json::to_value(&ctx).unwrap();
    assert_eq!(json["breakdown"]["energy"], 600);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("users")).unwrap();
    std::fs::write(temp.path().join("users").join("frank.json"), "{not json").unwrap();

    let store = JsonRecordStore::new(temp.path());
    assert!(store.history("frank").is_err());
}
