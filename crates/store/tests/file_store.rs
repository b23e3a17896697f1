//! Integration tests for the FileStore:
//! - Values survive a rebuild from the same file
//! - Deleted / expired keys are not written back
//! - Broken files surface as errors instead of silently resetting

use std::fs;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use store::{Clock, FileStore, KeyValueStore, StoreError, Ttl};

fn manual_clock(start: DateTime<Utc>) -> (Clock, Arc<Mutex<DateTime<Utc>>>) {
    let now = Arc::new(Mutex::new(start));
    let handle = now.clone();
    (Arc::new(move || *handle.lock().unwrap()), now)
}

#[test]
fn values_survive_rebuild() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("intake.store.ron");

    {
        let store = FileStore::builder()
            .with_store_file(&path)
            .build()
            .expect("build store");
        store.set("firstName", "Paola", Ttl::days(30)).unwrap();
        store.set("zipcode", "77001", Ttl::days(30)).unwrap();
    }

    assert!(path.exists(), "store file should be written on set");

    let reopened = FileStore::builder()
        .with_store_file(&path)
        .build()
        .expect("rebuild store");
    assert_eq!(reopened.get("firstName").as_deref(), Some("Paola"));
    assert_eq!(reopened.get("zipcode").as_deref(), Some("77001"));
    assert_eq!(reopened.get("city"), None);
}

#[test]
fn deleted_keys_are_not_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.ron");

    let store = FileStore::builder()
        .with_store_file(&path)
        .build()
        .unwrap();
    store.set("username", "paola_r", Ttl::days(30)).unwrap();
    store.delete("username").unwrap();

    assert_eq!(store.get("username"), None);
    let content = fs::read_to_string(&path).unwrap();
    assert!(
        !content.contains("paola_r"),
        "deleted value must not remain on disk: {content}"
    );
}

#[test]
fn expired_records_are_dropped_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.ron");
    let start = Utc.with_ymd_and_hms(2025, 12, 6, 9, 0, 0).unwrap();
    let (clock, now) = manual_clock(start);

    let store = FileStore::builder()
        .with_store_file(&path)
        .with_clock(clock.clone())
        .build()
        .unwrap();
    store.set("phone", "555-123-4567", Ttl::days(30)).unwrap();

    *now.lock().unwrap() = start + Ttl::days(31);
    let later = FileStore::builder()
        .with_store_file(&path)
        .with_clock(clock)
        .build()
        .unwrap();
    assert_eq!(later.get("phone"), None);
}

#[test]
fn reload_picks_up_external_writes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.ron");

    let a = FileStore::builder().with_store_file(&path).build().unwrap();
    let b = FileStore::builder().with_store_file(&path).build().unwrap();

    a.set("city", "Austin", Ttl::days(30)).unwrap();
    assert_eq!(b.get("city"), None);

    b.reload().unwrap();
    assert_eq!(b.get("city").as_deref(), Some("Austin"));
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.ron");
    fs::write(&path, "{ this is not ron").unwrap();

    let result = FileStore::builder().with_store_file(&path).build();
    assert!(matches!(result, Err(StoreError::Parse(_))));
}

#[test]
fn missing_path_is_rejected() {
    let result = FileStore::builder().build();
    assert!(matches!(result, Err(StoreError::Invalid(_))));
}

#[test]
fn failed_write_is_rolled_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("profile");
    let path = nested.join("store.ron");
    let store = FileStore::builder()
        .with_store_file(&path)
        .build()
        .expect("build store");
    store.set("city", "Houston", Ttl::days(30)).unwrap();

    // Writes go through a temp file next to the store; without the directory they fail.
    fs::remove_dir_all(&nested).unwrap();

    assert!(matches!(
        store.set("city", "Austin", Ttl::days(30)),
        Err(StoreError::Io(_))
    ));
    assert!(store.set("zipcode", "77001", Ttl::days(30)).is_err());

    assert_eq!(store.get("city").as_deref(), Some("Houston"));
    assert_eq!(store.get("zipcode"), None);
}
