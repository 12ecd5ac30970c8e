use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::repository::{DirectoryRepository, ProgressRepository, Storage, StorageError};
use tracker_core::model::{Directory, RawTeamProgress, TeamProgress};

const PROGRESS_FILE: &str = "progress.json";
const DIRECTORY_FILE: &str = "members.json";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JsonInitError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// JSON-document store: one flat file per persisted mapping.
///
/// Reads fail soft (a missing or malformed file is an empty mapping); saves
/// replace the whole document through a temp-file-then-rename so a partial
/// write is never visible to a subsequent load.
#[derive(Clone)]
pub struct JsonStore {
    progress_path: PathBuf,
    directory_path: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `JsonInitError` if the directory cannot be created.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, JsonInitError> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            progress_path: dir.join(PROGRESS_FILE),
            directory_path: dir.join(DIRECTORY_FILE),
        })
    }

    #[must_use]
    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    #[must_use]
    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    /// Synchronous read of the progress document.
    #[must_use]
    pub fn read_progress(&self) -> RawTeamProgress {
        read_document(&self.progress_path, "progress")
    }

    /// Synchronous whole-document write of the progress snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub fn write_progress(&self, snapshot: &TeamProgress) -> Result<(), StorageError> {
        write_document(&self.progress_path, snapshot)
    }

    /// Synchronous read of the directory document.
    #[must_use]
    pub fn read_directory(&self) -> Directory {
        read_document(&self.directory_path, "directory")
    }

    /// Synchronous whole-document write of the directory snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub fn write_directory(&self, snapshot: &Directory) -> Result<(), StorageError> {
        write_document(&self.directory_path, snapshot)
    }
}

fn read_document<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    if !path.exists() {
        return T::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("unreadable {what} document treated as empty: {err}");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("malformed {what} document treated as empty: {err}");
            T::default()
        }
    }
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;
    // Whole-document replace: temp file in the same directory, then rename,
    // so a crashed write leaves the prior content intact.
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(|err| StorageError::Write(err.to_string()))?;
    fs::rename(&temp_path, path).map_err(|err| StorageError::Write(err.to_string()))?;
    Ok(())
}

#[async_trait]
impl ProgressRepository for JsonStore {
    async fn load(&self) -> RawTeamProgress {
        self.read_progress()
    }

    async fn save(&self, snapshot: &TeamProgress) -> Result<(), StorageError> {
        self.write_progress(snapshot)
    }
}

#[async_trait]
impl DirectoryRepository for JsonStore {
    async fn load(&self) -> Directory {
        self.read_directory()
    }

    async fn save(&self, snapshot: &Directory) -> Result<(), StorageError> {
        self.write_directory(snapshot)
    }
}

impl Storage {
    /// Build a `Storage` backed by JSON documents under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `JsonInitError` if the data directory cannot be created.
    pub fn json(data_dir: impl AsRef<Path>) -> Result<Self, JsonInitError> {
        let store = JsonStore::open(data_dir)?;
        let progress: Arc<dyn ProgressRepository> = Arc::new(store.clone());
        let directory: Arc<dyn DirectoryRepository> = Arc::new(store);
        Ok(Self {
            progress,
            directory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::model::EntryDate;

    fn date(s: &str) -> EntryDate {
        s.parse().unwrap()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::open(tmp.path()).unwrap();
        assert!(store.read_progress().is_empty());
        assert!(store.read_directory().is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::open(tmp.path()).unwrap();
        fs::write(store.progress_path(), "{not json").unwrap();
        assert!(store.read_progress().is_empty());
    }

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::open(tmp.path()).unwrap();

        let mut team = TeamProgress::new();
        team.set_entry("Alice", date("2024-01-01"), "Monday", "Did setup");
        store.write_progress(&team).unwrap();

        let raw = store.read_progress();
        let (loaded, migrated) = TeamProgress::migrate_legacy(raw, date("2024-01-01"));
        assert!(!migrated);
        assert_eq!(loaded, team);
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::open(tmp.path()).unwrap();
        store.write_progress(&TeamProgress::new()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn persisted_document_uses_the_daily_log_shape() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::open(tmp.path()).unwrap();

        let mut team = TeamProgress::new();
        team.set_entry("Alice", date("2024-01-01"), "Monday", "Did setup");
        store.write_progress(&team).unwrap();

        let raw = fs::read_to_string(store.progress_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Alice"]["2024-01-01"]["day"], "Monday");
        assert_eq!(value["Alice"]["2024-01-01"]["progress"], "Did setup");
    }
}
