use std::path::Path;
use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::admin::AdminAuth;
use crate::directory_service::DirectoryService;
use crate::error::TrackerServicesError;
use crate::progress_service::ProgressService;

/// Assembles the collaborator surface the presentation layer talks to.
///
/// The directory layer is a capability: deployments that let users type
/// their own name simply never enable it, and presentation code can branch
/// on `directory()` without knowing which variant is live.
#[derive(Clone)]
pub struct TrackerServices {
    clock: Clock,
    storage: Storage,
    progress: Arc<ProgressService>,
    directory: Option<Arc<DirectoryService>>,
    admin: Option<AdminAuth>,
}

impl TrackerServices {
    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        let progress = Arc::new(ProgressService::new(clock, Arc::clone(&storage.progress)));
        Self {
            clock,
            storage,
            progress,
            directory: None,
            admin: AdminAuth::from_env(),
        }
    }

    /// Build services backed by JSON documents under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServicesError` if the data directory cannot be
    /// created.
    pub fn json(data_dir: impl AsRef<Path>, clock: Clock) -> Result<Self, TrackerServicesError> {
        Ok(Self::new(clock, Storage::json(data_dir)?))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Storage::in_memory())
    }

    /// Enable the anonymized-member directory layer.
    #[must_use]
    pub fn with_directory(mut self) -> Self {
        self.directory = Some(Arc::new(DirectoryService::new(
            self.clock,
            Arc::clone(&self.storage.directory),
            Arc::clone(&self.storage.progress),
        )));
        self
    }

    /// Override the admin credentials resolved from the environment.
    #[must_use]
    pub fn with_admin(mut self, admin: AdminAuth) -> Self {
        self.admin = Some(admin);
        self
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn directory(&self) -> Option<Arc<DirectoryService>> {
        self.directory.as_ref().map(Arc::clone)
    }

    #[must_use]
    pub fn admin(&self) -> Option<&AdminAuth> {
        self.admin.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::model::MemberId;
    use tracker_core::time::fixed_clock;

    #[test]
    fn directory_layer_is_off_unless_enabled() {
        let services = TrackerServices::in_memory(fixed_clock());
        assert!(services.directory().is_none());
    }

    #[tokio::test]
    async fn directory_layer_shares_the_progress_store() {
        let services = TrackerServices::in_memory(fixed_clock()).with_directory();
        let directory = services.directory().unwrap();
        directory
            .claim_display_name(MemberId::new(1), "Alice")
            .await
            .unwrap();

        let session = services.progress().open().await.unwrap();
        assert!(session.team().journal("Alice").is_some());
    }

    #[test]
    fn explicit_admin_overrides_the_environment() {
        let services = TrackerServices::in_memory(fixed_clock())
            .with_admin(AdminAuth::new("Creator", "s3cret"));
        assert!(services.admin().unwrap().verify("s3cret"));
    }
}
