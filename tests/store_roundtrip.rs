use std::fs;

use tempfile::tempdir;
use tourpay::model::{AppState, PenaltyMap, TourRecord};
use tourpay::session::PayrollSession;
use tourpay::store::{
    JsonFileStore, KEY_PENALTIES, KEY_RECORDS, KEY_SOURCE_FILE, KEY_TOUR_PRICE, KeyValueStore,
    MemoryStore, StateStore,
};

fn sample_state() -> AppState {
    let mut penalties = PenaltyMap::new();
    penalties.insert("Alice".to_string(), 25.5);
    penalties.insert("Ghost".to_string(), 10.0);
    AppState {
        records: vec![TourRecord {
            date: "2024-07-01".to_string(),
            warehouse: "North".to_string(),
            tour_id: "T1".to_string(),
            driver: "Alice".to_string(),
        }],
        price_per_tour: 95.5,
        penalties,
        source_file: Some("tours.csv".to_string()),
    }
}

fn snapshot(store: &impl KeyValueStore) -> [Option<String>; 4] {
    [
        store.get(KEY_RECORDS),
        store.get(KEY_TOUR_PRICE),
        store.get(KEY_PENALTIES),
        store.get(KEY_SOURCE_FILE),
    ]
}

#[test]
fn save_load_save_produces_identical_entries() {
    let mut store = StateStore::new(MemoryStore::new());
    store.save(&sample_state()).expect("first save");
    let first = snapshot(store.raw());

    let restored = store.load();
    assert_eq!(restored, sample_state());

    store.save(&restored).expect("second save");
    assert_eq!(snapshot(store.raw()), first);
}

#[test]
fn loading_an_empty_store_yields_the_defaults() {
    let store = StateStore::new(MemoryStore::new());
    let state = store.load();

    assert!(state.records.is_empty());
    assert_eq!(state.price_per_tour, 80.0);
    assert!(state.penalties.is_empty());
    assert_eq!(state.source_file, None);
}

#[test]
fn corrupt_entries_fall_back_independently() {
    let mut backing = MemoryStore::new();
    backing.set(KEY_RECORDS, "not json").expect("entry set");
    backing.set(KEY_TOUR_PRICE, "95.5").expect("entry set");
    backing
        .set(KEY_PENALTIES, "{\"Alice\":true}")
        .expect("entry set");
    backing.set(KEY_SOURCE_FILE, "tours.csv").expect("entry set");

    let state = StateStore::new(backing).load();

    assert!(state.records.is_empty());
    assert_eq!(state.price_per_tour, 95.5);
    assert!(state.penalties.is_empty());
    assert_eq!(state.source_file.as_deref(), Some("tours.csv"));
}

#[test]
fn unparseable_price_falls_back_to_the_default() {
    let mut backing = MemoryStore::new();
    backing.set(KEY_TOUR_PRICE, "eighty").expect("entry set");

    let state = StateStore::new(backing).load();

    assert_eq!(state.price_per_tour, 80.0);
}

#[test]
fn clearing_the_source_file_removes_its_entry() {
    let mut store = StateStore::new(MemoryStore::new());
    store.save(&sample_state()).expect("state saved");
    assert!(store.raw().get(KEY_SOURCE_FILE).is_some());

    let mut state = sample_state();
    state.source_file = None;
    store.save(&state).expect("state saved");

    assert_eq!(store.raw().get(KEY_SOURCE_FILE), None);
}

#[test]
fn file_store_persists_across_reopen() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("state.json");

    let mut store = StateStore::new(JsonFileStore::open(&path));
    store.save(&sample_state()).expect("state saved");

    let reopened = StateStore::new(JsonFileStore::open(&path));
    assert_eq!(reopened.load(), sample_state());
}

#[test]
fn file_store_starts_empty_on_unreadable_content() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("state.json");
    fs::write(&path, "{ not json").expect("file written");

    let store = JsonFileStore::open(&path);

    assert_eq!(store.get(KEY_RECORDS), None);
    assert_eq!(StateStore::new(store).load(), AppState::default());
}

#[test]
fn file_store_starts_empty_when_the_path_cannot_be_read() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("state.json");
    fs::create_dir(&path).expect("directory created");

    let store = JsonFileStore::open(&path);

    assert_eq!(store.get(KEY_RECORDS), None);
    assert_eq!(StateStore::new(store).load(), AppState::default());
}

#[test]
fn reset_removes_entries_but_the_price_survives() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("state.json");
    let input = temp_dir.path().join("tours.csv");
    fs::write(&input, "header\n2024-07-01,North,T1,Alice\n").expect("input written");

    let mut session = PayrollSession::open(JsonFileStore::open(&path));
    session.set_tour_price("95.5").expect("price set");
    session.import_file(&input).expect("import succeeded");
    session.set_penalty("Alice", "10").expect("penalty set");
    session.reset().expect("reset succeeded");

    let backing = JsonFileStore::open(&path);
    assert_eq!(backing.get(KEY_RECORDS), None);
    assert_eq!(backing.get(KEY_PENALTIES), None);
    assert_eq!(backing.get(KEY_SOURCE_FILE), None);
    assert_eq!(backing.get(KEY_TOUR_PRICE).as_deref(), Some("95.5"));

    let reopened = PayrollSession::open(JsonFileStore::open(&path));
    assert_eq!(reopened.state().price_per_tour, 95.5);
    assert!(reopened.state().records.is_empty());
}

#[test]
fn sessions_restore_their_full_state_from_the_store() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("state.json");
    let input = temp_dir.path().join("tours.csv");
    fs::write(
        &input,
        "header\n2024-07-01,North,T1,Alice\n2024-07-02,South,T2,Bob\n",
    )
    .expect("input written");

    {
        let mut session = PayrollSession::open(JsonFileStore::open(&path));
        session.import_file(&input).expect("import succeeded");
        session.set_penalty("Alice", "25.5").expect("penalty set");
    }

    let session = PayrollSession::open(JsonFileStore::open(&path));
    let state = session.state();

    assert_eq!(state.records.len(), 2);
    assert_eq!(state.source_file.as_deref(), Some("tours.csv"));
    assert_eq!(state.penalties.get("Alice"), Some(&25.5));

    let summary = session.summary();
    assert_eq!(summary.totals.total_tours, 2);
    assert_eq!(summary.totals.total_penalties, 25.5);
}
