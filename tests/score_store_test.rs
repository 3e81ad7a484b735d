//! Tests for score persistence through the SQLite and in-memory stores.

use tempfile::NamedTempFile;

use tally_toe::{
    MemoryStore, Outcome, Player, ScoreRecord, ScoreStore, ScoreTracker, SqliteStore,
};

/// Creates a temporary database file and an opened store. The file handle
/// must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_fresh_database_starts_at_zero() {
    let (_db, store) = setup_test_db();
    assert_eq!(store.get("scoreX").expect("Query failed"), None);

    let tracker = ScoreTracker::new(store);
    assert_eq!(tracker.scores(), &ScoreRecord::default());
}

#[test]
fn test_set_and_get_roundtrip() {
    let (_db, mut store) = setup_test_db();
    store.set("scoreO", "4").expect("Write failed");
    store.set("scoreO", "5").expect("Overwrite failed");
    assert_eq!(
        store.get("scoreO").expect("Query failed").as_deref(),
        Some("5")
    );
}

#[test]
fn test_recorded_win_survives_reopen() {
    let (db, store) = setup_test_db();
    let path = store.db_path().to_string();

    let mut tracker = ScoreTracker::new(store);
    let record = tracker
        .record(Outcome::Winner(Player::X))
        .expect("Record failed");
    assert_eq!(record, ScoreRecord::new(1, 0, 0));
    drop(tracker);

    let reopened = SqliteStore::open(&path).expect("Reopen failed");
    let tracker = ScoreTracker::new(reopened);
    assert_eq!(tracker.scores(), &ScoreRecord::new(1, 0, 0));
    drop(db);
}

#[test]
fn test_every_outcome_is_counted() {
    let (_db, store) = setup_test_db();
    let mut tracker = ScoreTracker::new(store);

    tracker.record(Outcome::Winner(Player::X)).expect("Record failed");
    tracker.record(Outcome::Winner(Player::O)).expect("Record failed");
    tracker.record(Outcome::Winner(Player::O)).expect("Record failed");
    let record = tracker.record(Outcome::Draw).expect("Record failed");

    assert_eq!(record, ScoreRecord::new(1, 2, 1));
    assert_eq!(record.total_games(), 4);

    let entries = tracker.store().entries().expect("Query failed");
    let keys: Vec<&str> = entries.iter().map(|e| e.key().as_str()).collect();
    assert_eq!(keys, vec!["scoreDraw", "scoreO", "scoreX"]);
    assert!(entries.iter().any(|e| e.key() == "scoreO" && e.value() == "2"));
}

#[test]
fn test_reset_persists_zeros() {
    let (_db, store) = setup_test_db();
    let path = store.db_path().to_string();

    let mut tracker = ScoreTracker::new(store);
    tracker.record(Outcome::Draw).expect("Record failed");
    tracker.record(Outcome::Winner(Player::O)).expect("Record failed");

    let record = tracker.reset_all().expect("Reset failed");
    assert_eq!(record, ScoreRecord::default());

    let reopened = SqliteStore::open(&path).expect("Reopen failed");
    assert_eq!(reopened.get("scoreDraw").expect("Query failed").as_deref(), Some("0"));
    assert_eq!(ScoreTracker::new(reopened).scores(), &ScoreRecord::default());
}

#[test]
fn test_malformed_values_load_as_zero() {
    let (_db, mut store) = setup_test_db();
    store.set("scoreX", "banana").expect("Write failed");
    store.set("scoreO", "7 wins").expect("Write failed");
    store.set("scoreDraw", "-3").expect("Write failed");

    let tracker = ScoreTracker::new(store);
    assert_eq!(tracker.scores(), &ScoreRecord::new(0, 7, 0));
}

#[test]
fn test_memory_store_keeps_scores_for_its_lifetime() {
    let mut tracker = ScoreTracker::new(MemoryStore::new());
    tracker.record(Outcome::Winner(Player::O)).expect("Record failed");

    assert_eq!(tracker.load(), ScoreRecord::new(0, 1, 0));
    assert_eq!(
        tracker.store().entries().get("scoreO").map(String::as_str),
        Some("1")
    );
}
