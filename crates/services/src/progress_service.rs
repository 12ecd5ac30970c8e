use chrono::{DateTime, Utc};
use std::sync::Arc;

use storage::repository::ProgressRepository;
use tracker_core::model::{EntryDate, TeamProgress};

use crate::Clock;
use crate::error::ProgressServiceError;

/// Opens progress sessions against a repository.
///
/// The service owns the time source so "today" is deterministic under test;
/// each opened session owns its in-memory copy of the team mapping.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, repo }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(
            clock,
            Arc::new(storage::repository::InMemoryRepository::new()),
        )
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The calendar day the service's clock currently falls on.
    #[must_use]
    pub fn today(&self) -> EntryDate {
        EntryDate::new(self.clock.today())
    }

    /// Load the persisted mapping and open a session over it.
    ///
    /// Legacy-format journals are normalized here, and if anything was
    /// normalized the migrated document is persisted back immediately, so
    /// later loads see only the current shape.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persisting the migrated
    /// document fails. A missing or malformed document is not an error.
    pub async fn open(&self) -> Result<ProgressSession, ProgressServiceError> {
        let raw = self.repo.load().await;
        let (team, migrated) = TeamProgress::migrate_legacy(raw, self.today());
        if migrated {
            self.repo.save(&team).await?;
        }
        Ok(ProgressSession {
            clock: self.clock,
            repo: Arc::clone(&self.repo),
            team,
        })
    }
}

/// One request/session's view of the team progress.
///
/// Single writer: every mutation flushes the whole snapshot back through
/// the repository before returning. Nothing is cached across writes, and
/// nothing protects against a second session racing its own flush;
/// whole-document last-writer-wins applies.
pub struct ProgressSession {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
    team: TeamProgress,
}

impl ProgressSession {
    /// Read-only view of the in-memory snapshot, for the overview builders.
    #[must_use]
    pub fn team(&self) -> &TeamProgress {
        &self.team
    }

    /// The calendar day the session's clock currently falls on.
    #[must_use]
    pub fn today(&self) -> EntryDate {
        EntryDate::new(self.clock.today())
    }

    /// Stored text for the user's entry at `date`, or `""`. Never fails.
    #[must_use]
    pub fn entry_text(&self, user: &str, date: EntryDate) -> &str {
        self.team.entry_text(user, date)
    }

    /// Write the user's update for `date` and flush.
    ///
    /// The weekday label is derived from the date. Any text is accepted,
    /// including the empty string, which clears the entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the flush fails; the
    /// persisted document then still holds the prior content.
    pub async fn submit(
        &mut self,
        user: &str,
        date: EntryDate,
        text: impl Into<String>,
    ) -> Result<(), ProgressServiceError> {
        self.team
            .set_entry(user, date, date.weekday_label(), text);
        self.repo.save(&self.team).await?;
        Ok(())
    }

    /// Write the user's update for today and flush.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the flush fails.
    pub async fn submit_today(
        &mut self,
        user: &str,
        text: impl Into<String>,
    ) -> Result<(), ProgressServiceError> {
        let today = self.today();
        self.submit(user, today, text).await
    }

    /// True when the user has a non-empty (after trimming) update for today.
    #[must_use]
    pub fn has_submitted_today(&self, user: &str) -> bool {
        self.team.submitted_on(user, self.today())
    }
}
