// Integration tests for event store persistence
// Exercises the JSON snapshot across simulated app restarts

mod fixtures;

use std::collections::HashSet;

use chrono::{Duration, Local, TimeZone};
use rust_countdown::models::event::{CountMode, EventId};
use rust_countdown::services::store::{EventStore, StoredEvents};
use tempfile::tempdir;

use fixtures::{dates, events};

#[test]
fn test_event_persistence() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("countdowns.json");

    let mut store = EventStore::open(&path);
    let target = Local::now() + Duration::days(120);
    store.create("発表会", target, CountMode::Countdown, "birthday", None);
    store.create("記念日", dates::jan_1_2025(), CountMode::Countup, "anniversary", None);
    assert!(!store.is_dirty(), "Snapshot should be written after create");

    let loaded = EventStore::open(&path);
    assert_eq!(loaded.events().len(), 2);
    // Newest creation first
    assert_eq!(loaded.events()[0].title, "記念日");
    assert_eq!(loaded.events()[0].mode, CountMode::Countup);
    assert_eq!(loaded.events()[1].title, "発表会");
    assert_eq!(loaded.events()[1].target_at, target);
}

#[test]
fn test_app_lifecycle_simulation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("countdowns.json");
    let target = Local::now() + Duration::days(30);

    // Simulate first app launch
    let id = {
        let mut store = EventStore::open(&path);
        store.create("試験", target, CountMode::Countdown, "birthday", None)
    }; // Store dropped, snapshot already on disk

    // Simulate second app launch - user renames the event
    {
        let mut store = EventStore::open(&path);
        let touched = store.update(
            id,
            "最終試験",
            target + Duration::days(1),
            CountMode::Countdown,
            "sunset",
            None,
        );
        assert!(touched, "Stored id should still resolve after restart");
    } // Store dropped

    // Simulate third app launch - edit should persist
    {
        let store = EventStore::open(&path);
        let event = store.event(id).expect("Event should survive restarts");
        assert_eq!(event.title, "最終試験");
        assert_eq!(event.target_at, target + Duration::days(1));
        assert_eq!(event.image_id, "sunset");
        assert!(event.updated_at >= event.created_at);
    }
}

#[test]
fn test_corrupt_snapshot_recovers_on_next_save() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("countdowns.json");
    std::fs::write(&path, "not json at all").expect("Failed to write garbage");

    {
        let mut store = EventStore::open(&path);
        assert!(store.events().is_empty(), "Corrupt snapshot should load as empty");
        store.create("やり直し", Local::now() + Duration::days(7), CountMode::Countdown, "birthday", None);
    } // Store dropped, valid snapshot written over the garbage

    let store = EventStore::open(&path);
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.events()[0].title, "やり直し");
}

#[test]
fn test_ids_are_never_reused_across_restarts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("countdowns.json");

    let first_id = {
        let mut store = EventStore::open(&path);
        let id = store.create("一回目", Local::now(), CountMode::Countup, "birthday", None);
        store.delete(&HashSet::from([id]));
        id
    }; // Store dropped with zero events on disk

    let mut store = EventStore::open(&path);
    let second_id = store.create("二回目", Local::now(), CountMode::Countup, "birthday", None);
    assert!(second_id.0 > first_id.0, "Deleted id should not be handed out again");
}

#[test]
fn test_rollover_is_persisted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("countdowns.json");
    let now = dates::mid_june_2025();

    let snapshot = StoredEvents {
        next_id: 2,
        events: vec![events::event(
            1,
            "お正月",
            dates::jan_1_2025(),
            CountMode::Countdown,
            Local.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap(),
        )],
    };
    {
        let mut store = EventStore::from_snapshot(snapshot, &path);
        assert!(store.rollover_pass(now), "Overdue countdown should advance");
    } // Store dropped, advanced target saved

    let store = EventStore::open(&path);
    let event = store.event(EventId(1)).expect("Event should survive rollover");
    assert_eq!(
        event.target_at,
        Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(event.updated_at, now);
}

#[test]
fn test_legacy_snapshot_gains_default_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("countdowns.json");

    // Snapshot written before image support existed
    let legacy = r#"{
  "next_id": 5,
  "events": [
    {
      "id": 1,
      "title": "昔のイベント",
      "target_at": "2099-01-01T00:00:00+00:00",
      "mode": "countdown",
      "created_at": "2025-01-01T00:00:00+00:00",
      "updated_at": "2025-01-01T00:00:00+00:00"
    }
  ]
}"#;
    std::fs::write(&path, legacy).expect("Failed to write legacy snapshot");

    let mut store = EventStore::open(&path);
    let event = store.event(EventId(1)).expect("Legacy event should load");
    assert_eq!(event.image_id, "birthday");
    assert!(event.custom_image.is_none());

    let id = store.create("新しいイベント", Local::now(), CountMode::Countup, "birthday", None);
    assert_eq!(id, EventId(5), "Stored next_id should be honored");
}

#[test]
fn test_events_listed_newest_first_after_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("countdowns.json");
    let target = Local.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

    let snapshot = StoredEvents {
        next_id: 4,
        events: vec![
            events::event(1, "古い", target, CountMode::Countdown, dates::jan_1_2025()),
            events::event(3, "新しい", target, CountMode::Countdown, dates::new_years_eve_2025()),
            events::event(2, "中間", target, CountMode::Countdown, dates::mid_june_2025()),
        ],
    };
    {
        let mut store = EventStore::from_snapshot(snapshot, &path);
        // A real mutation writes the snapshot out
        let touched = store.update(EventId(2), "中間", target, CountMode::Countdown, "birthday", None);
        assert!(touched);
    } // Store dropped

    let store = EventStore::open(&path);
    let titles: Vec<&str> = store.events().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["新しい", "中間", "古い"]);
}
