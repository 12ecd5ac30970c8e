use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EntryDate, ProgressEntry};

/// One user's progress journal, keyed by calendar date.
///
/// Invariant: at most one entry per date; writing the same date overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal(BTreeMap<EntryDate, ProgressEntry>);

impl Journal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry stored for `date`, if any.
    #[must_use]
    pub fn entry(&self, date: EntryDate) -> Option<&ProgressEntry> {
        self.0.get(&date)
    }

    /// Stored text for `date`, or the empty string if absent. Never fails.
    #[must_use]
    pub fn entry_text(&self, date: EntryDate) -> &str {
        self.0.get(&date).map_or("", ProgressEntry::text)
    }

    /// Writes or overwrites the entry at `date`.
    ///
    /// Accepts any text, including the empty string (meaning "cleared").
    pub fn set_entry(
        &mut self,
        date: EntryDate,
        day_label: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.0.insert(date, ProgressEntry::new(day_label, text));
    }

    /// True when the entry for `date` exists and carries a real update.
    #[must_use]
    pub fn submitted_on(&self, date: EntryDate) -> bool {
        self.0.get(&date).is_some_and(ProgressEntry::is_submitted)
    }

    /// True when every date of the reference date's Monday-start week has a
    /// non-empty update.
    #[must_use]
    pub fn week_complete(&self, reference: EntryDate) -> bool {
        reference.week().iter().all(|date| self.submitted_on(*date))
    }

    /// True when at least one entry carries a real update.
    #[must_use]
    pub fn has_any_progress(&self) -> bool {
        self.0.values().any(ProgressEntry::is_submitted)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntryDate, &ProgressEntry)> {
        self.0.iter()
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

/// Persisted form of a journal, as found on disk.
///
/// Older documents stored a user's journal as one plain string. The variant
/// is resolved at the deserialization boundary so typed code only ever sees
/// `Journal`; see [`StoredJournal::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredJournal {
    Entries(Journal),
    Legacy(String),
}

impl StoredJournal {
    /// Resolves the stored form into a date-keyed journal.
    ///
    /// A legacy string becomes a full current-week journal: the seven dates
    /// of the week containing `today`, with today's slot carrying the legacy
    /// text and the other six empty. Already-normalized journals pass
    /// through unchanged. Returns whether normalization changed anything,
    /// which drives the immediate persist-back on load.
    #[must_use]
    pub fn normalize(self, today: EntryDate) -> (Journal, bool) {
        match self {
            StoredJournal::Entries(journal) => (journal, false),
            StoredJournal::Legacy(text) => {
                let mut journal = Journal::new();
                for date in today.week() {
                    let slot_text = if date == today { text.as_str() } else { "" };
                    journal.set_entry(date, date.weekday_label(), slot_text);
                }
                (journal, true)
            }
        }
    }
}

impl From<Journal> for StoredJournal {
    fn from(journal: Journal) -> Self {
        StoredJournal::Entries(journal)
    }
}
