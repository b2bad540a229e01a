//! ISO-8601 week addressing
//!
//! Menus are stored per calendar week under a [`WeekKey`] such as `2025-W20`.
//! Two computations must agree on which seven days form "the week":
//! - [`week_key_of`]: ISO week numbering (week 1 holds the year's first Thursday)
//! - [`week_dates_of`]: plain Monday-anchored day arithmetic

use crate::day::Day;
use crate::error::{WeekKeyError, WeekResult};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Calendar week identifier, `"<ISO-year>-W<2-digit-week>"`
///
/// The year is the ISO week-numbering year, which differs from the calendar
/// year for a few days around New Year (`2024-12-30` is in `2025-W01`).
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    /// Create key from ISO year and week number
    ///
    /// # Errors
    /// Returns error if `week` is outside 1..=53.
    pub fn new(year: i32, week: u32) -> WeekResult<Self> {
        if !(1..=53).contains(&week) {
            return Err(WeekKeyError::WeekOutOfRange(week));
        }
        Ok(Self { year, week })
    }

    /// ISO week-numbering year
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// ISO week number (1..=53)
    #[inline]
    #[must_use]
    pub fn week(&self) -> u32 {
        self.week
    }
}

impl Display for WeekKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = WeekKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || WeekKeyError::Malformed(s.to_string());

        let (year, week) = s.split_once("-W").ok_or_else(malformed)?;
        if year.is_empty() || week.len() != 2 || !week.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let week: u32 = week.parse().map_err(|_| malformed())?;
        Self::new(year, week)
    }
}

impl TryFrom<String> for WeekKey {
    type Error = WeekKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}

/// Monday 00:00:00 to Sunday 23:59:59 of one week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekRange {
    /// Monday at midnight
    pub start: NaiveDateTime,
    /// Sunday at 23:59:59
    pub end: NaiveDateTime,
}

impl WeekRange {
    /// Monday of the week
    #[inline]
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Sunday of the week
    #[inline]
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Whether `date` falls inside the week
    #[inline]
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start_date()..=self.end_date()).contains(&date)
    }

    /// Calendar date of `day` within the week
    #[must_use]
    pub fn date_of(&self, day: Day) -> NaiveDate {
        self.start_date() + Duration::days(i64::from(day.index()))
    }

    /// `dd/mm/yyyy - dd/mm/yyyy`
    #[must_use]
    pub fn format_display(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

impl Display for WeekRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_display())
    }
}

/// Week key of the ISO week containing `date`
///
/// Follows ISO-8601: weeks start on Monday and week 1 is the week holding
/// the year's first Thursday.
#[must_use]
pub fn week_key_of(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    WeekKey {
        year: iso.year(),
        week: iso.week(),
    }
}

/// Monday-anchored range of the week containing `date`
///
/// Computed from the day of week alone, independent of [`week_key_of`].
#[must_use]
pub fn week_dates_of(date: NaiveDate) -> WeekRange {
    let back = i64::from(date.weekday().num_days_from_monday());
    let start = (date - Duration::days(back)).and_time(NaiveTime::MIN);
    let end = start + Duration::days(7) - Duration::seconds(1);
    WeekRange { start, end }
}

/// Shift `reference` by a whole number of weeks
///
/// # Errors
/// Returns error if the result leaves chrono's representable range.
pub fn shift_weeks(reference: NaiveDate, offset_weeks: i32) -> WeekResult<NaiveDate> {
    reference
        .checked_add_signed(Duration::weeks(i64::from(offset_weeks)))
        .ok_or(WeekKeyError::DateOutOfRange { offset_weeks })
}

/// Week key `offset_weeks` away from the week of `reference`
///
/// # Errors
/// Returns error if the shifted date is not representable.
pub fn week_key_with_offset(reference: NaiveDate, offset_weeks: i32) -> WeekResult<WeekKey> {
    shift_weeks(reference, offset_weeks).map(week_key_of)
}

/// Week key `offset_weeks` away from today (local clock)
///
/// # Errors
/// Returns error if the shifted date is not representable.
pub fn current_week_key(offset_weeks: i32) -> WeekResult<WeekKey> {
    week_key_with_offset(Local::now().date_naive(), offset_weeks)
}

/// Approximate date inside the week named by `key`
///
/// January 1st of the key's year plus `(week - 1) * 7` days. This is not an
/// inverse of [`week_key_of`]: around New Year the resulting date can fall in
/// the neighbouring ISO week. Use it for display only.
#[must_use]
pub fn approx_date_of(key: WeekKey) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(key.year, 1, 1)?
        .checked_add_signed(Duration::weeks(i64::from(key.week) - 1))
}

/// A stored week, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableWeek {
    /// Key as stored
    pub key: String,
    /// Parsed key, `None` if the stored key is malformed
    pub week: Option<WeekKey>,
    /// Approximate date range, see [`approx_date_of`]
    pub range: Option<WeekRange>,
    /// `"2025-W20 (12/05/2025 - 18/05/2025)"`, or the raw key
    pub display_name: String,
}

impl AvailableWeek {
    /// Describe a stored week key
    #[must_use]
    pub fn describe(key: &str) -> Self {
        let week = key.parse::<WeekKey>().ok();
        let range = week.and_then(approx_date_of).map(week_dates_of);
        let display_name = match range {
            Some(range) => format!("{key} ({range})"),
            None => key.to_string(),
        };
        Self {
            key: key.to_string(),
            week,
            range,
            display_name,
        }
    }
}

/// Describe stored week keys, sorted ascending by key text
#[must_use]
pub fn list_available_weeks<I, S>(keys: I) -> Vec<AvailableWeek>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut keys: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
    keys.sort();
    keys.dedup();
    keys.iter().map(|k| AvailableWeek::describe(k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(s: &str) -> WeekKey {
        s.parse().unwrap()
    }

    #[test]
    fn iso_reference_values() {
        assert_eq!(week_key_of(date(2024, 12, 30)).to_string(), "2025-W01");
        assert_eq!(week_key_of(date(2025, 1, 1)).to_string(), "2025-W01");
        assert_eq!(week_key_of(date(2024, 1, 1)).to_string(), "2024-W01");
    }

    #[test]
    fn iso_year_boundaries() {
        // Sunday belongs to the week that started on the previous Monday
        assert_eq!(week_key_of(date(2021, 1, 3)).to_string(), "2020-W53");
        assert_eq!(week_key_of(date(2021, 1, 4)).to_string(), "2021-W01");
        assert_eq!(week_key_of(date(2027, 1, 1)).to_string(), "2026-W53");
        assert_eq!(week_key_of(date(2025, 5, 12)).to_string(), "2025-W20");
    }

    #[test]
    fn key_parse_and_display() {
        let k = key("2025-W07");
        assert_eq!(k.year(), 2025);
        assert_eq!(k.week(), 7);
        assert_eq!(k.to_string(), "2025-W07");
    }

    #[test]
    fn key_parse_rejects_garbage() {
        for bad in ["", "2025", "2025-W7", "2025-W007", "2025W07", "abcd-W01", "2025-Wxx"] {
            assert!(
                matches!(bad.parse::<WeekKey>(), Err(WeekKeyError::Malformed(_))),
                "{bad} should be malformed"
            );
        }
        assert_eq!(
            "2025-W54".parse::<WeekKey>(),
            Err(WeekKeyError::WeekOutOfRange(54))
        );
        assert_eq!(
            "2025-W00".parse::<WeekKey>(),
            Err(WeekKeyError::WeekOutOfRange(0))
        );
    }

    #[test]
    fn key_serde_as_string() {
        let json = serde_json::to_string(&key("2025-W20")).unwrap();
        assert_eq!(json, "\"2025-W20\"");
        let back: WeekKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2025-W20"));
        assert!(serde_json::from_str::<WeekKey>("\"nope\"").is_err());
    }

    #[test]
    fn key_ordering_is_chronological() {
        assert!(key("2024-W52") < key("2025-W01"));
        assert!(key("2025-W02") < key("2025-W10"));
    }

    #[test]
    fn week_dates_monday_to_sunday() {
        let range = week_dates_of(date(2025, 5, 15));
        assert_eq!(range.start, date(2025, 5, 12).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, date(2025, 5, 18).and_hms_opt(23, 59, 59).unwrap());
        assert_eq!(range.format_display(), "12/05/2025 - 18/05/2025");
    }

    #[test]
    fn week_dates_sunday_goes_back_six_days() {
        let range = week_dates_of(date(2025, 5, 18));
        assert_eq!(range.start_date(), date(2025, 5, 12));
    }

    #[test]
    fn range_date_of_day() {
        let range = week_dates_of(date(2025, 5, 15));
        assert_eq!(range.date_of(Day::Monday), date(2025, 5, 12));
        assert_eq!(range.date_of(Day::Sunday), date(2025, 5, 18));
        assert!(range.contains(date(2025, 5, 18)));
        assert!(!range.contains(date(2025, 5, 19)));
    }

    #[test]
    fn offset_navigation() {
        let today = date(2025, 5, 15);
        assert_eq!(week_key_with_offset(today, 0).unwrap(), key("2025-W20"));
        assert_eq!(week_key_with_offset(today, 1).unwrap(), key("2025-W21"));
        assert_eq!(week_key_with_offset(today, -20).unwrap(), key("2024-W52"));
        assert_eq!(week_key_with_offset(today, -19).unwrap(), key("2025-W01"));
    }

    #[test]
    fn offset_out_of_range_is_error() {
        assert_eq!(
            week_key_with_offset(NaiveDate::MAX, 1),
            Err(WeekKeyError::DateOutOfRange { offset_weeks: 1 })
        );
    }

    #[test]
    fn current_week_key_is_consistent_with_local_date() {
        let before = week_key_of(Local::now().date_naive());
        let current = current_week_key(0).unwrap();
        let after = week_key_of(Local::now().date_naive());
        assert!(current == before || current == after);
    }

    #[test]
    fn approx_date_mid_year() {
        let approx = approx_date_of(key("2025-W20")).unwrap();
        assert_eq!(approx, date(2025, 5, 14));
        assert_eq!(week_key_of(approx), key("2025-W20"));
    }

    #[test]
    fn approx_date_can_miss_at_year_boundary() {
        // Jan 1st 2021 is a Friday, still inside 2020-W53
        let approx = approx_date_of(key("2021-W01")).unwrap();
        assert_eq!(week_key_of(approx), key("2020-W53"));
    }

    #[test]
    fn list_available_weeks_sorted_with_ranges() {
        let weeks = list_available_weeks(["2025-W21", "2025-W20", "garbage"]);
        let keys: Vec<&str> = weeks.iter().map(|w| w.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-W20", "2025-W21", "garbage"]);

        assert_eq!(weeks[0].display_name, "2025-W20 (12/05/2025 - 18/05/2025)");
        assert_eq!(weeks[2].week, None);
        assert_eq!(weeks[2].range, None);
        assert_eq!(weeks[2].display_name, "garbage");
    }

    proptest! {
        #[test]
        fn prop_same_week_same_key_and_range(days in -200_000i64..200_000, a in 0i64..7, b in 0i64..7) {
            let epoch = date(2000, 1, 3); // a Monday
            let monday = week_dates_of(epoch + Duration::days(days)).start_date();
            let d1 = monday + Duration::days(a);
            let d2 = monday + Duration::days(b);
            prop_assert_eq!(week_key_of(d1), week_key_of(d2));
            prop_assert_eq!(week_dates_of(d1), week_dates_of(d2));
        }

        #[test]
        fn prop_range_spans_six_days_and_change(days in -200_000i64..200_000) {
            let d = date(2000, 1, 1) + Duration::days(days);
            let range = week_dates_of(d);
            prop_assert_eq!(range.end - range.start, Duration::days(6) + Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59));
            prop_assert_eq!(range.start_date().weekday(), chrono::Weekday::Mon);
            prop_assert!(range.contains(d));
        }

        #[test]
        fn prop_key_and_range_agree(days in -200_000i64..200_000) {
            let d = date(2000, 1, 1) + Duration::days(days);
            let range = week_dates_of(d);
            prop_assert_eq!(week_key_of(range.start_date()), week_key_of(d));
            prop_assert_eq!(week_key_of(range.end_date()), week_key_of(d));
        }

        #[test]
        fn prop_key_text_roundtrip(days in -200_000i64..200_000) {
            let k = week_key_of(date(2000, 1, 1) + Duration::days(days));
            prop_assert_eq!(k.to_string().parse::<WeekKey>(), Ok(k));
        }
    }
}
