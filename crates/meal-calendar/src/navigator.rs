//! Week navigation
//!
//! [`WeekNavigator`] tracks the week being viewed as a signed offset from a
//! reference date. Every step recomputes from the reference; nothing is cached.

use crate::error::WeekResult;
use crate::week::{shift_weeks, week_dates_of, week_key_of, WeekKey, WeekRange};
use chrono::{Local, NaiveDate};

/// Offset-based cursor over calendar weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekNavigator {
    reference: NaiveDate,
    offset: i32,
}

impl WeekNavigator {
    /// Navigator anchored at `reference`, showing its week
    #[inline]
    #[must_use]
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            reference,
            offset: 0,
        }
    }

    /// Navigator anchored at today's local date
    #[must_use]
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Anchor date
    #[inline]
    #[must_use]
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Weeks away from the anchor week
    #[inline]
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Move `weeks` forward (negative goes back)
    pub fn step(&mut self, weeks: i32) {
        self.offset = self.offset.saturating_add(weeks);
        tracing::trace!(offset = self.offset, "week navigation");
    }

    /// Move one week forward
    #[inline]
    pub fn next(&mut self) {
        self.step(1);
    }

    /// Move one week back
    #[inline]
    pub fn previous(&mut self) {
        self.step(-1);
    }

    /// Return to the anchor week
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// A date inside the week being viewed
    ///
    /// # Errors
    /// Returns error if the offset leaves the representable calendar.
    pub fn current_date(&self) -> WeekResult<NaiveDate> {
        shift_weeks(self.reference, self.offset)
    }

    /// Key of the week being viewed
    ///
    /// # Errors
    /// Returns error if the offset leaves the representable calendar.
    pub fn current_key(&self) -> WeekResult<WeekKey> {
        self.current_date().map(week_key_of)
    }

    /// Date range of the week being viewed
    ///
    /// # Errors
    /// Returns error if the offset leaves the representable calendar.
    pub fn current_range(&self) -> WeekResult<WeekRange> {
        self.current_date().map(week_dates_of)
    }
}
