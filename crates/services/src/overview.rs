//! Pure view builders over a `TeamProgress` snapshot.
//!
//! Everything here is presentation-agnostic: no pre-formatted strings
//! beyond the stored text, no mutation, no repository access. The
//! presentation layer decides how an empty update is rendered ("No update
//! yet"), how rows become a table, and how the completion series becomes a
//! chart.

use serde::Serialize;

use tracker_core::model::{EntryDate, TeamProgress};

/// One user's line in the "today's submissions" view.
///
/// Every known user gets a row; an empty `text` means no update yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayRow {
    pub user: String,
    pub text: String,
}

impl TodayRow {
    /// True when the row carries a real (trimmed non-empty) update.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// One stored entry, flattened for tabular display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressRow {
    pub user: String,
    pub date: EntryDate,
    pub day: String,
    pub text: String,
}

/// One row per known user for the given day, in map iteration order,
/// including users with nothing submitted yet.
#[must_use]
pub fn today_rows(team: &TeamProgress, today: EntryDate) -> Vec<TodayRow> {
    team.iter()
        .map(|(user, journal)| TodayRow {
            user: user.to_string(),
            text: journal.entry_text(today).to_string(),
        })
        .collect()
}

/// Users with at least one real update anywhere in their journal.
#[must_use]
pub fn active_users(team: &TeamProgress) -> Vec<&str> {
    team.iter()
        .filter(|(_, journal)| journal.has_any_progress())
        .map(|(user, _)| user)
        .collect()
}

/// True when the user's journal covers every day of the reference week.
///
/// An unknown user is never week-complete.
#[must_use]
pub fn week_complete(team: &TeamProgress, user: &str, reference: EntryDate) -> bool {
    team.journal(user)
        .is_some_and(|journal| journal.week_complete(reference))
}

/// How many users have a complete reference week.
#[must_use]
pub fn completion_count(team: &TeamProgress, reference: EntryDate) -> usize {
    team.iter()
        .filter(|(_, journal)| journal.week_complete(reference))
        .count()
}

/// Per-user done/pending status for the given day, over active users.
///
/// This is the series behind the team completion chart.
#[must_use]
pub fn today_completion(team: &TeamProgress, today: EntryDate) -> Vec<(String, bool)> {
    team.iter()
        .filter(|(_, journal)| journal.has_any_progress())
        .map(|(user, journal)| (user.to_string(), journal.submitted_on(today)))
        .collect()
}

/// One row per stored entry, in store iteration order.
#[must_use]
pub fn tabular_rows(team: &TeamProgress) -> Vec<ProgressRow> {
    team.iter()
        .flat_map(|(user, journal)| {
            journal.iter().map(move |(date, entry)| ProgressRow {
                user: user.to_string(),
                date: *date,
                day: entry.day().to_string(),
                text: entry.text().to_string(),
            })
        })
        .collect()
}

/// Tabular rows in the admin table order: date descending, then user
/// ascending.
#[must_use]
pub fn display_rows(team: &TeamProgress) -> Vec<ProgressRow> {
    let mut rows = tabular_rows(team);
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.user.cmp(&b.user)));
    rows
}

/// The whole snapshot as delimited text: a header row, then one data row
/// per stored entry.
#[must_use]
pub fn csv_export(team: &TeamProgress) -> String {
    let mut out = String::from("Intern Name,Date,Day,Progress\n");
    for row in tabular_rows(team) {
        out.push_str(&csv_field(&row.user));
        out.push(',');
        out.push_str(&row.date.to_string());
        out.push(',');
        out.push_str(&csv_field(&row.day));
        out.push(',');
        out.push_str(&csv_field(&row.text));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
