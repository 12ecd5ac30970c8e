#![forbid(unsafe_code)]

pub mod admin;
pub mod directory_service;
pub mod error;
pub mod overview;
pub mod progress_service;
pub mod tracker_services;

pub use tracker_core::Clock;

pub use admin::AdminAuth;
pub use directory_service::DirectoryService;
pub use error::{DirectoryServiceError, ProgressServiceError, TrackerServicesError};
pub use progress_service::{ProgressService, ProgressSession};
pub use tracker_services::TrackerServices;
