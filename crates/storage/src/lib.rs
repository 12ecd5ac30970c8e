#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{JsonInitError, JsonStore};
pub use repository::{
    DirectoryRepository, InMemoryRepository, ProgressRepository, Storage, StorageError,
};
