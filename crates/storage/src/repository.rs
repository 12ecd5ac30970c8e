use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use tracker_core::model::{Directory, RawTeamProgress, TeamProgress};

/// Errors surfaced by storage adapters.
///
/// Only writes fail hard: a lost submission would break the system's core
/// promise. Reads recover to an empty mapping instead of erroring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("write failed: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the team progress document.
///
/// The document is replaced wholesale on every save; there is no
/// incremental patching and no cross-session locking. Two sessions that
/// each load, mutate, and save can lose one of the two updates
/// (whole-document last-writer-wins).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Read the persisted progress mapping.
    ///
    /// A missing, unreadable, or malformed backing document is not an
    /// error; it reads as "no data yet" and yields an empty mapping. The
    /// raw form may still contain legacy string values; resolving those is
    /// the model's job.
    async fn load(&self) -> RawTeamProgress;

    /// Atomically replace the persisted mapping with the given snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written. Prior
    /// content stays visible to subsequent loads in that case.
    async fn save(&self, snapshot: &TeamProgress) -> Result<(), StorageError>;
}

/// Repository contract for the member directory document.
///
/// Same fail-soft read / hard-fail write contract as the progress document,
/// persisted independently.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn load(&self) -> Directory;

    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save(&self, snapshot: &Directory) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<TeamProgress>>,
    directory: Arc<Mutex<Directory>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self) -> RawTeamProgress {
        match self.progress.lock() {
            Ok(guard) => guard.to_raw(),
            Err(_) => RawTeamProgress::new(),
        }
    }

    async fn save(&self, snapshot: &TeamProgress) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|err| StorageError::Write(err.to_string()))?;
        *guard = snapshot.clone();
        Ok(())
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryRepository {
    async fn load(&self) -> Directory {
        match self.directory.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Directory::new(),
        }
    }

    async fn save(&self, snapshot: &Directory) -> Result<(), StorageError> {
        let mut guard = self
            .directory
            .lock()
            .map_err(|err| StorageError::Write(err.to_string()))?;
        *guard = snapshot.clone();
        Ok(())
    }
}

/// Aggregates both repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub directory: Arc<dyn DirectoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let directory: Arc<dyn DirectoryRepository> = Arc::new(repo);
        Self {
            progress,
            directory,
        }
    }
}
