use serde::Serialize;
use std::collections::BTreeMap;

use super::{EntryDate, Journal, StoredJournal};

/// The whole team's progress as read from disk, legacy variants unresolved.
pub type RawTeamProgress = BTreeMap<String, StoredJournal>;

/// In-memory progress map for the whole team, keyed by user name.
///
/// Journals are created lazily on first read/write and never explicitly
/// deleted. Iteration order is the sorted key order, which is what the
/// admin views render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamProgress(BTreeMap<String, Journal>);

impl TeamProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a raw on-disk mapping, normalizing any legacy-string
    /// journals into full current-week journals.
    ///
    /// Idempotent: a mapping with no legacy values passes through unchanged.
    /// Returns whether anything was normalized, so the caller can persist
    /// the migrated form back immediately.
    #[must_use]
    pub fn migrate_legacy(raw: RawTeamProgress, today: EntryDate) -> (Self, bool) {
        let mut team = BTreeMap::new();
        let mut migrated = false;
        for (user, stored) in raw {
            let (journal, changed) = stored.normalize(today);
            migrated |= changed;
            team.insert(user, journal);
        }
        (Self(team), migrated)
    }

    /// The persisted form of this snapshot.
    #[must_use]
    pub fn to_raw(&self) -> RawTeamProgress {
        self.0
            .iter()
            .map(|(user, journal)| (user.clone(), StoredJournal::from(journal.clone())))
            .collect()
    }

    /// The journal stored for `user`, if any.
    #[must_use]
    pub fn journal(&self, user: &str) -> Option<&Journal> {
        self.0.get(user)
    }

    /// Creates an empty journal for `user` if absent.
    pub fn ensure_user(&mut self, user: &str) {
        if !self.0.contains_key(user) {
            self.0.insert(user.to_string(), Journal::new());
        }
    }

    /// Stored text for the user's entry at `date`, or the empty string if
    /// either the user or the entry is absent. Never fails.
    #[must_use]
    pub fn entry_text(&self, user: &str, date: EntryDate) -> &str {
        self.0.get(user).map_or("", |journal| journal.entry_text(date))
    }

    /// Writes or overwrites the user's entry at `date`, lazily creating the
    /// journal. Accepts any text, including the empty string.
    pub fn set_entry(
        &mut self,
        user: &str,
        date: EntryDate,
        day_label: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.0
            .entry(user.to_string())
            .or_default()
            .set_entry(date, day_label, text);
    }

    /// True when the user's entry for `date` exists and carries a real update.
    #[must_use]
    pub fn submitted_on(&self, user: &str, date: EntryDate) -> bool {
        self.0
            .get(user)
            .is_some_and(|journal| journal.submitted_on(date))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Journal)> {
        self.0.iter().map(|(user, journal)| (user.as_str(), journal))
    }

    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> EntryDate {
        s.parse().unwrap()
    }

    #[test]
    fn write_then_read_identity() {
        let mut team = TeamProgress::new();
        team.set_entry("Alice", date("2024-01-01"), "Monday", "Did setup");
        assert_eq!(team.entry_text("Alice", date("2024-01-01")), "Did setup");
    }

    #[test]
    fn absent_user_reads_as_empty() {
        let team = TeamProgress::new();
        assert_eq!(team.entry_text("Nobody", date("2024-01-01")), "");
        assert!(!team.submitted_on("Nobody", date("2024-01-01")));
    }

    #[test]
    fn set_entry_lazily_creates_the_journal() {
        let mut team = TeamProgress::new();
        assert!(team.journal("Alice").is_none());
        team.set_entry("Alice", date("2024-01-01"), "Monday", "Did setup");
        assert_eq!(team.journal("Alice").map(Journal::len), Some(1));
    }

    #[test]
    fn ensure_user_does_not_clobber_existing_entries() {
        let mut team = TeamProgress::new();
        team.set_entry("Alice", date("2024-01-01"), "Monday", "Did setup");
        team.ensure_user("Alice");
        assert_eq!(team.entry_text("Alice", date("2024-01-01")), "Did setup");
    }

    #[test]
    fn migrate_legacy_normalizes_only_legacy_values() {
        let today = date("2023-11-14");
        let mut raw = RawTeamProgress::new();
        raw.insert(
            "Bob".to_string(),
            StoredJournal::Legacy("worked on X".to_string()),
        );
        let mut alice = Journal::new();
        alice.set_entry(date("2023-11-13"), "Monday", "kept");
        raw.insert("Alice".to_string(), StoredJournal::from(alice.clone()));

        let (team, migrated) = TeamProgress::migrate_legacy(raw, today);

        assert!(migrated);
        assert_eq!(team.journal("Alice"), Some(&alice));
        assert_eq!(team.entry_text("Bob", today), "worked on X");
        assert_eq!(team.journal("Bob").map(Journal::len), Some(7));
    }

    #[test]
    fn migrate_legacy_is_idempotent() {
        let today = date("2023-11-14");
        let mut raw = RawTeamProgress::new();
        raw.insert(
            "Bob".to_string(),
            StoredJournal::Legacy("worked on X".to_string()),
        );

        let (once, _) = TeamProgress::migrate_legacy(raw, today);
        let (twice, migrated) = TeamProgress::migrate_legacy(once.to_raw(), today);

        assert!(!migrated);
        assert_eq!(once, twice);
    }

    #[test]
    fn iteration_order_is_sorted_by_user() {
        let mut team = TeamProgress::new();
        team.set_entry("Cara", date("2024-01-01"), "Monday", "c");
        team.set_entry("Alice", date("2024-01-01"), "Monday", "a");
        team.set_entry("Bob", date("2024-01-01"), "Monday", "b");
        let users: Vec<&str> = team.users().collect();
        assert_eq!(users, vec!["Alice", "Bob", "Cara"]);
    }
}
