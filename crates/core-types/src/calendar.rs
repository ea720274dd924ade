use crate::error::CoreError;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day with no time-of-day and no timezone.
///
/// Every ledger entry belongs to exactly one `CalendarDay`. Callers holding a
/// timestamp must normalize it into a day before handing records to the
/// analytics engine; the conversions below keep the date as written and never
/// shift it across a UTC boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Number of days (28-31) in the month containing this day.
    pub fn days_in_month(&self) -> u32 {
        let (year, month) = (self.0.year(), self.0.month());
        let (next_month_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        // First day of next month, minus one day, is the last day of this month.
        NaiveDate::from_ymd_opt(next_month_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// The following day, or `None` at the end of the supported calendar.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The `YYYY-MM-DD` key used to bucket entries.
    pub fn iso_key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Number of whole days from `self` to `other` (negative when `other` is earlier).
    pub fn days_until(&self, other: CalendarDay) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    pub fn checked_sub_days(&self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso_key())
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<NaiveDateTime> for CalendarDay {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime.date())
    }
}

impl FromStr for CalendarDay {
    type Err = CoreError;

    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. For timestamps the
    /// calendar date as written is kept; time and offset are discarded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(datetime.date_naive()));
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(datetime.date()));
        }
        Err(CoreError::InvalidDate(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An inclusive range of calendar days. Always holds `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: CalendarDay,
    end: CalendarDay,
}

impl DateRange {
    pub fn new(start: CalendarDay, end: CalendarDay) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.date(),
                end: end.date(),
            });
        }
        Ok(Self { start, end })
    }

    /// The window of `days` days ending at (and including) `end`.
    /// A window of 0 or 1 days is the single day `end`.
    pub fn trailing(end: CalendarDay, days: u32) -> Result<Self, CoreError> {
        let back = u64::from(days.max(1) - 1);
        let start = end.checked_sub_days(back).ok_or_else(|| {
            CoreError::InvalidInput("days".to_string(), format!("{days} days before {end}"))
        })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> CalendarDay {
        self.start
    }

    pub fn end(&self) -> CalendarDay {
        self.end
    }

    /// Number of days in the range, counting both endpoints.
    pub fn num_days(&self) -> usize {
        (self.start.days_until(self.end) + 1) as usize
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every day in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        std::iter::successors(Some(self.start), |day| day.succ()).take_while(move |day| *day <= self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    #[test]
    fn days_in_month_tracks_actual_month_length() {
        assert_eq!(day("2025-01-15").days_in_month(), 31);
        assert_eq!(day("2025-02-01").days_in_month(), 28);
        assert_eq!(day("2024-02-29").days_in_month(), 29);
        assert_eq!(day("2025-04-30").days_in_month(), 30);
        assert_eq!(day("2025-12-31").days_in_month(), 31);
    }

    #[test]
    fn timestamps_keep_the_written_date() {
        assert_eq!(day("2025-03-10T23:30:00-03:00"), day("2025-03-10"));
        assert_eq!(day("2025-03-10T00:00:00.000Z"), day("2025-03-10"));
        assert_eq!(day("2025-03-10T08:15:00"), day("2025-03-10"));
        assert!("10/03/2025".parse::<CalendarDay>().is_err());
    }

    #[test]
    fn naive_datetime_drops_time_of_day() {
        let datetime = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(CalendarDay::from(datetime), day("2025-06-01"));
    }

    #[test]
    fn serde_uses_iso_dates() {
        let json = serde_json::to_string(&day("2025-07-04")).unwrap();
        assert_eq!(json, "\"2025-07-04\"");
        let back: CalendarDay = serde_json::from_str("\"2025-07-04T12:00:00Z\"").unwrap();
        assert_eq!(back, day("2025-07-04"));
    }

    #[test]
    fn range_rejects_reversed_endpoints() {
        let err = DateRange::new(day("2025-01-02"), day("2025-01-01")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
    }

    #[test]
    fn range_spans_month_boundaries_without_gaps() {
        let range = DateRange::new(day("2025-01-30"), day("2025-02-02")).unwrap();
        let days: Vec<String> = range.days().map(|d| d.iso_key()).collect();
        assert_eq!(days, vec!["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]);
        assert_eq!(range.num_days(), 4);
        assert!(range.contains(day("2025-02-01")));
        assert!(!range.contains(day("2025-02-03")));
    }

    #[test]
    fn single_day_range_has_one_day() {
        let range = DateRange::new(day("2025-05-05"), day("2025-05-05")).unwrap();
        assert_eq!(range.num_days(), 1);
        assert_eq!(range.days().count(), 1);
    }

    #[test]
    fn trailing_window_ends_on_reference_day() {
        let range = DateRange::trailing(day("2025-03-07"), 7).unwrap();
        assert_eq!(range.start(), day("2025-03-01"));
        assert_eq!(range.end(), day("2025-03-07"));

        let today = DateRange::trailing(day("2025-03-07"), 1).unwrap();
        assert_eq!(today.start(), today.end());
    }
}
