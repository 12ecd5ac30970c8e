use std::fs;

use storage::json::JsonStore;
use storage::repository::{DirectoryRepository, ProgressRepository, Storage};
use tracker_core::model::{Directory, EntryDate, MemberId, StoredJournal, TeamProgress};

fn date(s: &str) -> EntryDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn json_roundtrip_through_the_repository_traits() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::json(tmp.path()).unwrap();

    let mut team = TeamProgress::new();
    team.set_entry("Alice", date("2024-01-01"), "Monday", "Did setup");
    team.set_entry("Bob", date("2024-01-02"), "Tuesday", "Wrote tests");
    storage.progress.save(&team).await.unwrap();

    let raw = storage.progress.load().await;
    let (loaded, migrated) = TeamProgress::migrate_legacy(raw, date("2024-01-02"));
    assert!(!migrated);
    assert_eq!(loaded, team);
}

#[tokio::test]
async fn save_is_idempotent_at_the_document_level() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::json(tmp.path()).unwrap();
    let store = JsonStore::open(tmp.path()).unwrap();

    let mut team = TeamProgress::new();
    team.set_entry("Alice", date("2024-01-01"), "Monday", "Did setup");
    storage.progress.save(&team).await.unwrap();
    let first = fs::read_to_string(store.progress_path()).unwrap();

    let raw = storage.progress.load().await;
    let (reloaded, _) = TeamProgress::migrate_legacy(raw, date("2024-01-01"));
    storage.progress.save(&reloaded).await.unwrap();
    let second = fs::read_to_string(store.progress_path()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn legacy_string_values_survive_the_raw_load() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonStore::open(tmp.path()).unwrap();
    fs::write(store.progress_path(), r#"{"Bob": "worked on X"}"#).unwrap();

    let raw = ProgressRepository::load(&store).await;
    assert_eq!(
        raw.get("Bob"),
        Some(&StoredJournal::Legacy("worked on X".to_string()))
    );

    // today is a Tuesday in the fixed test calendar
    let (team, migrated) = TeamProgress::migrate_legacy(raw, date("2023-11-14"));
    assert!(migrated);
    assert_eq!(team.entry_text("Bob", date("2023-11-14")), "worked on X");
    assert_eq!(team.entry_text("Bob", date("2023-11-13")), "");
    assert_eq!(team.journal("Bob").map(|j| j.len()), Some(7));
}

#[tokio::test]
async fn directory_document_is_independent_of_progress() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::json(tmp.path()).unwrap();

    let mut directory = Directory::new();
    directory.claim(MemberId::new(1), "Alice").unwrap();
    storage.directory.save(&directory).await.unwrap();

    assert!(storage.progress.load().await.is_empty());
    let reloaded = storage.directory.load().await;
    assert_eq!(reloaded.display_name(MemberId::new(1)), Some("Alice"));
}

#[tokio::test]
async fn malformed_documents_read_as_no_data_yet() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::json(tmp.path()).unwrap();
    let store = JsonStore::open(tmp.path()).unwrap();

    fs::write(store.progress_path(), "][ definitely not json").unwrap();
    fs::write(store.directory_path(), "42").unwrap();

    assert!(storage.progress.load().await.is_empty());
    assert!(storage.directory.load().await.is_empty());
}
