//! Calendar date ranges and month arithmetic
//!
//! All dates are timezone-naive `NaiveDate` values. Month arithmetic works on
//! plain (year, month) pairs so nothing depends on a local clock or offset.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

/// An inclusive range of calendar dates. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, returning `None` if `end` precedes `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A single-day range
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The whole calendar month containing (year, month)
    pub fn month(year: i32, month: u32) -> Self {
        let (year, month) = normalize_month(year, month as i32);
        let start = clamped_date(year, month, 1);
        let end = clamped_date(year, month, days_in_month(year, month));
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, counting both ends. Always >= 1.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Smallest range covering both `self` and `other`
    pub fn union(&self, other: &DateRange) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Overlap of two ranges, if any
    pub fn intersection(&self, other: &DateRange) -> Option<Self> {
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = normalize_month(year, month as i32 + 1);
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or(NaiveDate::MAX);
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    (first_next - first).num_days() as u32
}

/// Build a date, clamping `day` to the last day of the month.
///
/// Day 31 in February yields Feb 28 (or 29), day 0 yields the 1st.
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let (year, month) = normalize_month(year, month as i32);
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Shift a (year, month) pair by `delta` months
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    normalize_month(year, month as i32 + delta)
}

/// (year, month) of a date
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// The day before `date`
pub fn day_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}

fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    let zero_based = month - 1;
    let year = year + zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) + 1;
    (year, month as u32)
}
