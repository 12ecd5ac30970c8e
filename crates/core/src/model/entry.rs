use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::time;

/// Calendar-date key for a journal entry, serialized as `YYYY-MM-DD`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryDate(NaiveDate);

impl EntryDate {
    /// Creates an `EntryDate` from a calendar date.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The calendar day a timestamp falls on.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    /// Returns the underlying date.
    #[must_use]
    pub fn value(&self) -> NaiveDate {
        self.0
    }

    /// Weekday this date falls on.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Full weekday name for display, e.g. `"Tuesday"`.
    #[must_use]
    pub fn weekday_label(&self) -> &'static str {
        time::weekday_label(self.0.weekday())
    }

    /// The seven dates of the Monday-start week containing this date.
    #[must_use]
    pub fn week(&self) -> [EntryDate; 7] {
        time::week_of(self.0).map(EntryDate::new)
    }
}

impl fmt::Debug for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryDate({})", self.0)
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Error type for parsing an `EntryDate` from an ISO date string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse calendar date from {raw:?}")]
pub struct ParseDateError {
    raw: String,
}

impl FromStr for EntryDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(EntryDate::new)
            .map_err(|_| ParseDateError { raw: s.to_string() })
    }
}

/// One submitted (or still empty) progress update.
///
/// The weekday label is redundant under date keying but kept on each entry
/// for display, matching the persisted document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    day: String,
    #[serde(rename = "progress")]
    text: String,
}

impl ProgressEntry {
    /// Creates an entry with the given weekday label and free-form text.
    ///
    /// Any text is accepted, including the empty string, which means
    /// "cleared" / "not yet submitted".
    #[must_use]
    pub fn new(day: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            text: text.into(),
        }
    }

    /// Creates an empty (not yet submitted) slot for the given weekday.
    #[must_use]
    pub fn empty(day: impl Into<String>) -> Self {
        Self::new(day, "")
    }

    /// Weekday label stored on the entry.
    #[must_use]
    pub fn day(&self) -> &str {
        &self.day
    }

    /// Free-form update text; empty means no submission.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the entry carries a real update.
    ///
    /// Trims surrounding whitespace first; whitespace-only text does not
    /// count as submitted. Every submission check goes through this.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
