use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc, Weekday};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Returns the calendar day the clock currently falls on.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Full weekday name as shown to users and stored on each entry.
#[must_use]
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// The seven dates of the Monday-start week containing `date`.
#[must_use]
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
    std::array::from_fn(|offset| monday + Days::new(offset as u64))
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z, a Tuesday).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_a_tuesday() {
        let today = fixed_clock().today();
        assert_eq!(today.weekday(), Weekday::Tue);
        assert_eq!(weekday_label(today.weekday()), "Tuesday");
    }

    #[test]
    fn week_of_starts_on_monday_and_spans_seven_days() {
        let week = week_of(fixed_clock().today());
        assert_eq!(week[0].weekday(), Weekday::Mon);
        assert_eq!(week[6].weekday(), Weekday::Sun);
        assert_eq!(week[0].to_string(), "2023-11-13");
        assert_eq!(week[6].to_string(), "2023-11-19");
        assert!(week.contains(&fixed_clock().today()));
    }

    #[test]
    fn week_of_is_stable_across_the_week() {
        let tuesday = fixed_clock().today();
        for date in week_of(tuesday) {
            assert_eq!(week_of(date), week_of(tuesday));
        }
    }
}
