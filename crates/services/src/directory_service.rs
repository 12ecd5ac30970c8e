use std::sync::Arc;

use storage::repository::{DirectoryRepository, ProgressRepository};
use tracker_core::model::{EntryDate, MemberId, MemberIdentity, TeamProgress};

use crate::Clock;
use crate::error::DirectoryServiceError;

/// Maps anonymous members to self-chosen display names.
///
/// This layer is optional; deployments without it store journals directly
/// under whatever user key the presentation layer resolves. When present,
/// progress entry is blocked until a member has claimed a name.
#[derive(Clone)]
pub struct DirectoryService {
    clock: Clock,
    directory: Arc<dyn DirectoryRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl DirectoryService {
    #[must_use]
    pub fn new(
        clock: Clock,
        directory: Arc<dyn DirectoryRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            directory,
            progress,
        }
    }

    /// The member's display name, if one has been claimed.
    pub async fn display_name(&self, member: MemberId) -> Option<String> {
        self.directory
            .load()
            .await
            .display_name(member)
            .map(str::to_string)
    }

    /// Resolves where the member stands in the naming flow.
    pub async fn resolve(&self, member: MemberId) -> MemberIdentity {
        self.directory.load().await.resolve(member)
    }

    /// The user key a member may write progress under.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryServiceError::NotNamed` while the member is still
    /// anonymous; progress entry is blocked until a name is claimed.
    pub async fn require_named(&self, member: MemberId) -> Result<String, DirectoryServiceError> {
        match self.resolve(member).await {
            MemberIdentity::Named(name) => Ok(name),
            MemberIdentity::Anonymous(member) => Err(DirectoryServiceError::NotNamed(member)),
        }
    }

    /// Claim a display name for the member and persist the directory.
    ///
    /// The claimed name becomes the key the member's journal lives under,
    /// so an empty journal is created for it if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryServiceError::Directory` with `AlreadyClaimed` if
    /// the member already has a name (the existing mapping is unchanged),
    /// or with `EmptyDisplayName` for a blank choice. Returns
    /// `DirectoryServiceError::Storage` if either document cannot be
    /// written.
    pub async fn claim_display_name(
        &self,
        member: MemberId,
        chosen: &str,
    ) -> Result<String, DirectoryServiceError> {
        let mut directory = self.directory.load().await;
        let name = directory.claim(member, chosen)?;
        self.directory.save(&directory).await?;

        let today = EntryDate::new(self.clock.today());
        let raw = self.progress.load().await;
        let (mut team, migrated) = TeamProgress::migrate_legacy(raw, today);
        if team.journal(&name).is_none() {
            team.ensure_user(&name);
            self.progress.save(&team).await?;
        } else if migrated {
            self.progress.save(&team).await?;
        }

        Ok(name)
    }

    /// All known members with their claimed names, for the admin view.
    pub async fn members(&self) -> Vec<(MemberId, Option<String>)> {
        self.directory
            .load()
            .await
            .iter()
            .map(|(member, name)| (member, name.map(str::to_string)))
            .collect()
    }
}
