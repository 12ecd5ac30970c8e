//! Shared error types for the services crate.

use thiserror::Error;

use storage::json::JsonInitError;
use storage::repository::StorageError;
use tracker_core::model::{DirectoryError, MemberId};

/// Errors emitted by `ProgressService` and `ProgressSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DirectoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DirectoryServiceError {
    #[error("{0} has not chosen a display name yet")]
    NotNamed(MemberId),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping tracker services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerServicesError {
    #[error(transparent)]
    Json(#[from] JsonInitError),
}
