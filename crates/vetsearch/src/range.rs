//! Inclusive date-time ranges for schedule filters.

use std::fmt;

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// An inclusive `[start, end]` interval of UTC timestamps.
///
/// Construction through [`DateRange::new`] never fails. A range whose start
/// lies after its end is kept as given and contains no timestamp, so a
/// specification built from it matches nothing. Use [`DateRange::try_new`]
/// to reject such ranges up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        DateRange { start, end }
    }

    /// Creates a range, rejecting one whose start is after its end.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let range = DateRange::new(start, end);
        range.validate()?;
        Ok(range)
    }

    /// Covers whole calendar days, from the first instant of `first` to the
    /// last instant of `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        let end = last
            .checked_add_days(Days::new(1))
            .map(|next| start_of_day(next) - Duration::nanoseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        DateRange::new(start_of_day(first), end)
    }

    /// Covers a single calendar day.
    pub fn day(day: NaiveDate) -> Self {
        DateRange::days(day, day)
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Returns `true` if the start lies after the end.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_inverted() {
            return Err(SearchError::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

pub(crate) fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_cover_both_ends() {
        let january = DateRange::days(date(2024, 1, 1), date(2024, 1, 31));

        assert!(january.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(january.contains(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()));
        assert!(!january.contains(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
        assert!(!january.contains(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::days(date(2024, 2, 1), date(2024, 1, 1));

        assert!(range.is_inverted());
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()));
    }

    #[test]
    fn try_new_rejects_inverted() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert!(matches!(
            DateRange::try_new(start, end),
            Err(SearchError::InvertedRange { .. })
        ));
        assert!(DateRange::try_new(end, start).is_ok());
        assert!(DateRange::try_new(start, start).is_ok());
    }

    #[test]
    fn single_day() {
        let range = DateRange::day(date(2024, 3, 10));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap()));
    }
}
