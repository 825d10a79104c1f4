//! Budget cycles and their weekly breakdown
//!
//! These are computed views: the report builder creates them fresh on
//! every request and nothing here is persisted.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::money::Money;
use super::period::DateRange;

/// Spending health of a week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Safe,
    Warning,
    Danger,
}

impl WeekStatus {
    /// Classify a week.
    ///
    /// `Danger` when the week is over budget, `Warning` when spend exceeds
    /// `warning_percent`% of the weekly budget, `Safe` otherwise.
    pub fn classify(
        weekly_budget: Money,
        actual_spent: Money,
        balance: Money,
        warning_percent: u32,
    ) -> Self {
        if balance.is_negative() {
            Self::Danger
        } else if actual_spent.exceeds_percent_of(weekly_budget, warning_percent) {
            Self::Warning
        } else {
            Self::Safe
        }
    }
}

impl fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// Where a cycle's original allocation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationSource {
    /// Net of the cycle's own entries plus overdue entries
    Ledger,
    /// Whole reference month, used when there is only one cycle
    WholeMonth,
    /// Equal share of the month total after a ledger failure
    MonthShare,
    /// Nothing could be computed; allocation is zero
    Unavailable,
}

impl fmt::Display for AllocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ledger => write!(f, "ledger"),
            Self::WholeMonth => write!(f, "whole month"),
            Self::MonthShare => write!(f, "month share (fallback)"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A cycle window before any budget is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleWindow {
    pub cycle_number: u32,
    pub range: DateRange,
}

impl CycleWindow {
    pub fn start(&self) -> NaiveDate {
        self.range.start()
    }

    pub fn end(&self) -> NaiveDate {
        self.range.end()
    }
}

/// One calendar week (Monday to Sunday, clipped) inside a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub week_number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days_in_period: i64,
    pub daily_budget: Money,
    pub weekly_budget: Money,
    pub actual_spent: Money,
    pub balance: Money,
    /// Running sum of `balance` over this cycle's weeks up to and including this one
    pub accumulated_balance: Money,
    pub status: WeekStatus,
}

/// A budget cycle between two income events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub cycle_number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: i64,
    pub original_allocation: Money,
    pub allocation_source: AllocationSource,
    /// Surplus carried in from earlier cycles
    pub rollover: Money,
    /// `original_allocation + rollover`
    pub budget: Money,
    pub weeks: Vec<Week>,
    pub total_spent: Money,
    /// `budget - total_spent`
    pub real_balance: Money,
}

impl Cycle {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_classify_thresholds() {
        // weekly 100.00
        let weekly = m(10_000);
        let status = |spent: i64| WeekStatus::classify(weekly, m(spent), weekly - m(spent), 80);

        assert_eq!(status(8_500), WeekStatus::Warning);
        assert_eq!(status(10_500), WeekStatus::Danger);
        assert_eq!(status(5_000), WeekStatus::Safe);
        assert_eq!(status(8_000), WeekStatus::Safe);
        assert_eq!(status(10_000), WeekStatus::Warning);
    }

    #[test]
    fn test_classify_negative_budget_is_danger() {
        let weekly = m(-1_000);
        assert_eq!(
            WeekStatus::classify(weekly, m(0), weekly, 80),
            WeekStatus::Danger
        );
    }

    #[test]
    fn test_classify_zero_budget_no_spend_is_safe() {
        assert_eq!(
            WeekStatus::classify(m(0), m(0), m(0), 80),
            WeekStatus::Safe
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&WeekStatus::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(
            serde_json::to_string(&AllocationSource::MonthShare).unwrap(),
            "\"month_share\""
        );
    }
}
