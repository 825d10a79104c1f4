//! Payment schedule resolution
//!
//! Turns a cost center's recurrence days into the cycle windows around a
//! reference date. A cycle runs from one income day up to the day before
//! the next one.
//!
//! Only the start of a cycle is moved to a business day: income that would
//! land on a weekend is expected on the Friday before. The end is always
//! derived from the unadjusted next income day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::models::period::{clamped_date, day_before, shift_month, year_month};
use crate::models::{CycleWindow, DateRange, RecurrenceDays};

/// Default look-back tolerance (days) used by the recency filter
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Move a weekend date back to the preceding Friday
pub fn adjust_to_business_day(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date - Duration::days(2),
        _ => date,
    }
}

/// Resolves cycle windows for a set of recurrence days
#[derive(Debug, Clone, Copy)]
pub struct PaymentScheduleResolver {
    lookback_days: i64,
}

impl Default for PaymentScheduleResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK_DAYS)
    }
}

impl PaymentScheduleResolver {
    pub fn new(lookback_days: i64) -> Self {
        Self { lookback_days }
    }

    /// Cycle windows for `reference`, numbered from 1 in chronological order.
    ///
    /// A single recurrence day yields exactly the cycle containing the
    /// reference date. Several days yield one cycle per day of the reference
    /// month, filtered by recency.
    pub fn resolve(&self, days: &RecurrenceDays, reference: NaiveDate) -> Vec<CycleWindow> {
        let candidates = self.candidate_cycles(days, reference);
        let ranges = if days.is_single() {
            candidates
        } else {
            self.filter_recent(candidates, reference)
        };

        let windows: Vec<CycleWindow> = ranges
            .into_iter()
            .enumerate()
            .map(|(i, range)| CycleWindow {
                cycle_number: i as u32 + 1,
                range,
            })
            .collect();

        debug!(
            reference = %reference,
            days = %days,
            cycles = windows.len(),
            "resolved cycle windows"
        );
        windows
    }

    /// Every cycle the schedule produces for `reference`, before filtering
    pub fn candidate_cycles(&self, days: &RecurrenceDays, reference: NaiveDate) -> Vec<DateRange> {
        match days.as_slice() {
            [day] => vec![single_day_cycle(*day, reference)],
            many => multi_day_cycles(many, reference),
        }
    }

    /// Keep cycles that have not ended before `reference`, or that start no
    /// later than `lookback_days` after it. Never returns an empty set when
    /// given a non-empty one.
    fn filter_recent(&self, candidates: Vec<DateRange>, reference: NaiveDate) -> Vec<DateRange> {
        let horizon = reference + Duration::days(self.lookback_days);
        let kept: Vec<DateRange> = candidates
            .iter()
            .copied()
            .filter(|c| c.end() >= reference || c.start() <= horizon)
            .collect();

        if kept.is_empty() {
            debug!(reference = %reference, "recency filter removed every cycle; keeping all");
            candidates
        } else {
            kept
        }
    }
}

fn single_day_cycle(day: u32, reference: NaiveDate) -> DateRange {
    let (year, month) = year_month(reference);
    let this_month = clamped_date(year, month, day);

    let (raw_start, next_occurrence) = if reference >= this_month {
        let (ny, nm) = shift_month(year, month, 1);
        (this_month, clamped_date(ny, nm, day))
    } else {
        let (py, pm) = shift_month(year, month, -1);
        (clamped_date(py, pm, day), this_month)
    };

    cycle_range(raw_start, next_occurrence)
}

fn multi_day_cycles(days: &[u32], reference: NaiveDate) -> Vec<DateRange> {
    let (year, month) = year_month(reference);

    // Clamping can map two configured days onto the same date in a short
    // month; those collapse into one boundary.
    let mut occurrences: Vec<NaiveDate> =
        days.iter().map(|d| clamped_date(year, month, *d)).collect();
    occurrences.dedup();

    let (ny, nm) = shift_month(year, month, 1);
    let wrap = clamped_date(ny, nm, days[0]);

    occurrences
        .iter()
        .enumerate()
        .map(|(i, start)| {
            let next = occurrences.get(i + 1).copied().unwrap_or(wrap);
            cycle_range(*start, next)
        })
        .collect()
}

fn cycle_range(raw_start: NaiveDate, next_occurrence: NaiveDate) -> DateRange {
    let start = adjust_to_business_day(raw_start);
    let end = day_before(next_occurrence);
    // start only ever moves earlier and next_occurrence > raw_start
    DateRange::new(start, end).unwrap_or_else(|| DateRange::single(start))
}
