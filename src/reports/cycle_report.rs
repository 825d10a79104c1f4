//! Weekly Control Report
//!
//! Resolves a cost center's budget cycles around a reference date, splits
//! each into calendar weeks and measures actual spend against a budget
//! prorated by days. Unspent surplus rolls forward from cycle to cycle.

use std::io::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;
use tracing::{info, warn};

use crate::error::{CycleError, CycleResult};
use crate::ledger::LedgerSource;
use crate::models::{
    CostCenterId, Cycle, CycleWindow, Money, RecurrenceDays, Week, WeekStatus,
};
use crate::services::{
    carry_forward, Allocation, CycleBudgetAllocator, LedgerAggregator, LedgerSnapshot,
    PaymentScheduleResolver, WeekPartitioner, DEFAULT_LOOKBACK_DAYS,
};
use crate::time::Clock;

/// Default spend share (percent of the weekly budget) that flags a warning
pub const DEFAULT_WARNING_THRESHOLD_PERCENT: u32 = 80;

/// Tunables for report generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Look-back tolerance of the cycle recency filter
    pub lookback_days: i64,
    pub warning_threshold_percent: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            warning_threshold_percent: DEFAULT_WARNING_THRESHOLD_PERCENT,
        }
    }
}

/// Parse a `YYYY-MM-DD` reference date
pub fn parse_reference_date(raw: &str) -> CycleResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        CycleError::InvalidInput(format!("invalid reference date '{}': {}", raw, e))
    })
}

/// Build a weekly control report in one call
pub fn build_cycle_report<S, C>(
    source: &S,
    clock: &C,
    options: ReportOptions,
    cost_center_id: CostCenterId,
    reference_date: NaiveDate,
) -> CycleResult<CycleReport>
where
    S: LedgerSource + ?Sized,
    C: Clock + ?Sized,
{
    CycleReportBuilder::new(source, clock, options).build(cost_center_id, reference_date)
}

/// Orchestrates schedule resolution, allocation and week accounting
pub struct CycleReportBuilder<'a, S: LedgerSource + ?Sized, C: Clock + ?Sized> {
    source: &'a S,
    clock: &'a C,
    options: ReportOptions,
}

impl<'a, S: LedgerSource + ?Sized, C: Clock + ?Sized> CycleReportBuilder<'a, S, C> {
    pub fn new(source: &'a S, clock: &'a C, options: ReportOptions) -> Self {
        Self {
            source,
            clock,
            options,
        }
    }

    /// Build the report for `cost_center_id` around `reference_date`.
    ///
    /// Ledger entries are fetched once for the span of all cycles and the
    /// overdue set at most once. Cycles are processed in order so each one
    /// sees the surplus of those before it.
    ///
    /// A failed window query does not fail the report: spend is reported as
    /// zero with `spend_available` cleared, and with several cycles each one
    /// falls back to its share of the month total.
    pub fn build(
        &self,
        cost_center_id: CostCenterId,
        reference_date: NaiveDate,
    ) -> CycleResult<CycleReport> {
        let cost_center = self.source.cost_center(cost_center_id)?;
        let config = cost_center.config();
        let today = self.clock.today();

        let windows = PaymentScheduleResolver::new(self.options.lookback_days)
            .resolve(&config.recurrence_days, reference_date);
        let span = windows
            .iter()
            .map(|w| w.range)
            .reduce(|a, b| a.union(&b))
            .ok_or_else(|| CycleError::InvalidInput("no cycles resolved".into()))?;

        let snapshot = match LedgerAggregator::fetch(self.source, cost_center_id, span) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(
                    cost_center = %cost_center_id,
                    window = %span,
                    cause = %e,
                    "ledger window unavailable, spend not measured"
                );
                None
            }
        };
        let empty = LedgerSnapshot::default();
        let entries = snapshot.as_ref().unwrap_or(&empty);
        let allocator = CycleBudgetAllocator::new(
            self.source,
            cost_center_id,
            reference_date,
            today,
            windows.len(),
        );

        let mut accumulated = Money::zero();
        let mut cycles = Vec::with_capacity(windows.len());

        if let [only] = windows.as_slice() {
            let cycle = self.build_cycle(only, allocator.whole_month()?, Money::zero(), entries);
            accumulated = carry_forward(accumulated, cycle.real_balance);
            cycles.push(cycle);
        } else {
            for window in &windows {
                let allocation = allocator.allocate(window.range, snapshot.as_ref());
                let cycle = self.build_cycle(window, allocation, accumulated, entries);
                accumulated = carry_forward(accumulated, cycle.real_balance);
                cycles.push(cycle);
            }
        }

        info!(
            cost_center = %cost_center_id,
            reference = %reference_date,
            cycles = cycles.len(),
            rollover = %accumulated,
            "built weekly control report"
        );

        Ok(CycleReport {
            cost_center_id,
            cost_center_name: cost_center.name,
            reference_date,
            today,
            recurrence_days: config.recurrence_days,
            spend_available: snapshot.is_some(),
            cycles,
            accumulated_rollover: accumulated,
        })
    }

    fn build_cycle(
        &self,
        window: &CycleWindow,
        allocation: Allocation,
        rollover: Money,
        snapshot: &LedgerSnapshot,
    ) -> Cycle {
        let total_days = window.range.days();
        let budget = allocation.original + rollover;
        let daily_budget = budget.prorate(1, total_days);

        let mut accumulated_balance = Money::zero();
        let weeks: Vec<Week> = WeekPartitioner::partition(window.range)
            .into_iter()
            .enumerate()
            .map(|(i, range)| {
                let days_in_period = range.days();
                let weekly_budget = budget.prorate(days_in_period, total_days);
                let actual_spent = snapshot.spent_in(range);
                let balance = weekly_budget - actual_spent;
                accumulated_balance += balance;

                Week {
                    week_number: i as u32 + 1,
                    start: range.start(),
                    end: range.end(),
                    days_in_period,
                    daily_budget,
                    weekly_budget,
                    actual_spent,
                    balance,
                    accumulated_balance,
                    status: WeekStatus::classify(
                        weekly_budget,
                        actual_spent,
                        balance,
                        self.options.warning_threshold_percent,
                    ),
                }
            })
            .collect();

        let total_spent: Money = weeks.iter().map(|w| w.actual_spent).sum();

        Cycle {
            cycle_number: window.cycle_number,
            start: window.start(),
            end: window.end(),
            total_days,
            original_allocation: allocation.original,
            allocation_source: allocation.source,
            rollover,
            budget,
            weeks,
            total_spent,
            real_balance: budget - total_spent,
        }
    }
}

/// The weekly control view for one cost center
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub cost_center_id: CostCenterId,
    pub cost_center_name: String,
    pub reference_date: NaiveDate,
    /// The date overdue entries were measured against
    pub today: NaiveDate,
    pub recurrence_days: RecurrenceDays,
    /// False when the ledger window could not be read and every
    /// `actual_spent` is a placeholder zero
    pub spend_available: bool,
    pub cycles: Vec<Cycle>,
    /// Surplus carried out of the last cycle
    pub accumulated_rollover: Money,
}

/// One CSV row per week
#[derive(Debug, Serialize)]
struct WeekRow {
    cycle: u32,
    cycle_start: NaiveDate,
    cycle_end: NaiveDate,
    cycle_budget: String,
    allocation_source: String,
    week: u32,
    week_start: NaiveDate,
    week_end: NaiveDate,
    days: i64,
    daily_budget: String,
    weekly_budget: String,
    actual_spent: String,
    balance: String,
    accumulated_balance: String,
    status: WeekStatus,
}

fn plain(amount: Money) -> String {
    amount.format_with_symbol("")
}

fn date_formatter(format: &str) -> impl Fn(NaiveDate) -> String + '_ {
    let valid = StrftimeItems::new(format).all(|item| !matches!(item, Item::Error));
    move |date| {
        if valid {
            date.format(format).to_string()
        } else {
            date.to_string()
        }
    }
}

impl CycleReport {
    /// The cycle containing the reference date, if any
    pub fn current_cycle(&self) -> Option<&Cycle> {
        self.cycles.iter().find(|c| c.contains(self.reference_date))
    }

    /// Format the report for terminal display.
    ///
    /// Dates use the strftime pattern `date_format`; an invalid pattern
    /// falls back to ISO dates.
    pub fn format_terminal(&self, currency_symbol: &str, date_format: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let day = date_formatter(date_format);
        let mut output = String::new();

        let title = if self.cost_center_name.is_empty() {
            self.cost_center_id.to_string()
        } else {
            format!("{} ({})", self.cost_center_name, self.cost_center_id)
        };
        output.push_str(&format!("Weekly Control: {}\n", title));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Reference date: {}   Income days: {}\n",
            day(self.reference_date),
            self.recurrence_days
        ));
        if !self.spend_available {
            output.push_str("Actual spend unavailable: the ledger could not be read\n");
        }

        for cycle in &self.cycles {
            let marker = if cycle.contains(self.reference_date) {
                "  <- current"
            } else {
                ""
            };
            output.push_str(&format!(
                "\nCycle {}: {} to {} ({} days){}\n",
                cycle.cycle_number,
                day(cycle.start),
                day(cycle.end),
                cycle.total_days,
                marker
            ));
            output.push_str(&format!(
                "Allocation: {} [{}]   Rollover: {}   Budget: {}\n",
                money(cycle.original_allocation),
                cycle.allocation_source,
                money(cycle.rollover),
                money(cycle.budget)
            ));

            let mut builder = Builder::default();
            builder.push_record([
                "Week", "Start", "End", "Days", "Daily", "Weekly", "Spent", "Balance",
                "Accumulated", "Status",
            ]);
            for week in &cycle.weeks {
                builder.push_record([
                    week.week_number.to_string(),
                    day(week.start),
                    day(week.end),
                    week.days_in_period.to_string(),
                    money(week.daily_budget),
                    money(week.weekly_budget),
                    money(week.actual_spent),
                    money(week.balance),
                    money(week.accumulated_balance),
                    week.status.to_string(),
                ]);
            }
            let mut table = Table::from(builder);
            table.with(Style::rounded());
            output.push_str(&table.to_string());
            output.push('\n');

            output.push_str(&format!(
                "Spent: {}   Real balance: {}\n",
                money(cycle.total_spent),
                money(cycle.real_balance)
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Accumulated rollover: {}\n",
            money(self.accumulated_rollover)
        ));

        output
    }

    /// Export one row per week to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> CycleResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for cycle in &self.cycles {
            for week in &cycle.weeks {
                csv_writer
                    .serialize(WeekRow {
                        cycle: cycle.cycle_number,
                        cycle_start: cycle.start,
                        cycle_end: cycle.end,
                        cycle_budget: plain(cycle.budget),
                        allocation_source: cycle.allocation_source.to_string(),
                        week: week.week_number,
                        week_start: week.start,
                        week_end: week.end,
                        days: week.days_in_period,
                        daily_budget: plain(week.daily_budget),
                        weekly_budget: plain(week.weekly_budget),
                        actual_spent: plain(week.actual_spent),
                        balance: plain(week.balance),
                        accumulated_balance: plain(week.accumulated_balance),
                        status: week.status,
                    })
                    .map_err(|e| CycleError::Export(e.to_string()))?;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| CycleError::Export(e.to_string()))
    }

    /// Export the full report as pretty-printed JSON
    pub fn export_json(&self) -> CycleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export the full report as YAML
    pub fn export_yaml(&self) -> CycleResult<String> {
        serde_yaml::to_string(self).map_err(|e| CycleError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{InMemoryLedger, LedgerOperation};
    use crate::models::{AllocationSource, CostCenter, LedgerEntry};
    use crate::time::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn m(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn report(ledger: &InMemoryLedger, cc: &CostCenter, reference: NaiveDate) -> CycleReport {
        build_cycle_report(
            ledger,
            &FixedClock(reference),
            ReportOptions::default(),
            cc.id,
            reference,
        )
        .unwrap()
    }

    /// Two income days, March 2025: cycles [Mar 5, Mar 19] and [Mar 20, Apr 4]
    fn two_cycle_ledger(cc: &CostCenter) -> InMemoryLedger {
        InMemoryLedger::new().with_cost_center(cc.clone()).with_entries([
            LedgerEntry::income(cc.id, date(2025, 3, 5), m(100_000)),
            LedgerEntry::expense(cc.id, date(2025, 3, 6), m(30_000)),
            LedgerEntry::income(cc.id, date(2025, 3, 20), m(80_000)),
            LedgerEntry::expense(cc.id, date(2025, 3, 21), m(10_000)),
        ])
    }

    #[test]
    fn test_single_cycle_uses_whole_month() {
        let cc = CostCenter::new("Home", Some("15"));
        let ledger = InMemoryLedger::new().with_cost_center(cc.clone()).with_entries([
            LedgerEntry::income(cc.id, date(2025, 1, 15), m(310_000)),
            LedgerEntry::expense(cc.id, date(2025, 1, 16), m(5_000)),
        ]);
        let report = report(&ledger, &cc, date(2025, 1, 20));

        assert_eq!(report.cycles.len(), 1);
        let cycle = &report.cycles[0];
        assert_eq!(cycle.start, date(2025, 1, 15));
        assert_eq!(cycle.end, date(2025, 2, 14));
        assert_eq!(cycle.total_days, 31);
        assert_eq!(cycle.allocation_source, AllocationSource::WholeMonth);
        assert_eq!(cycle.original_allocation, m(305_000));
        assert_eq!(cycle.rollover, Money::zero());

        // Wed Jan 15 .. Sun Jan 19
        let first = &cycle.weeks[0];
        assert_eq!(first.days_in_period, 5);
        assert_eq!(first.daily_budget, m(9_839));
        assert_eq!(first.weekly_budget, m(49_194));
        assert_eq!(first.actual_spent, m(5_000));
        assert_eq!(first.balance, m(44_194));
        assert_eq!(cycle.weeks.len(), 5);
        assert_eq!(ledger.call_count(LedgerOperation::MonthTotal), 1);
    }

    #[test]
    fn test_sunday_income_day_moves_start_to_friday() {
        // 2025-06-15 is a Sunday
        let cc = CostCenter::new("Home", Some("15"));
        let ledger = InMemoryLedger::new().with_cost_center(cc.clone());
        let report = report(&ledger, &cc, date(2025, 6, 20));
        let cycle = &report.cycles[0];
        assert_eq!(cycle.start, date(2025, 6, 13));
        assert_eq!(cycle.end, date(2025, 7, 14));
    }

    #[test]
    fn test_surplus_rolls_into_next_cycle() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        assert_eq!(report.cycles.len(), 2);
        let (first, second) = (&report.cycles[0], &report.cycles[1]);
        assert_eq!(first.start, date(2025, 3, 5));
        assert_eq!(first.end, date(2025, 3, 19));
        assert_eq!(first.total_days, 15);
        assert_eq!(second.start, date(2025, 3, 20));
        assert_eq!(second.end, date(2025, 4, 4));

        assert_eq!(first.original_allocation, m(70_000));
        assert_eq!(first.rollover, Money::zero());
        assert_eq!(first.total_spent, m(30_000));
        assert_eq!(first.real_balance, m(40_000));

        assert_eq!(second.original_allocation, m(70_000));
        assert_eq!(second.rollover, m(40_000));
        assert_eq!(second.budget, m(110_000));
        assert_eq!(second.real_balance, m(100_000));

        assert_eq!(report.accumulated_rollover, m(140_000));
        assert_eq!(report.current_cycle().map(|c| c.cycle_number), Some(1));
    }

    #[test]
    fn test_overspent_cycle_does_not_reduce_next() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = InMemoryLedger::new().with_cost_center(cc.clone()).with_entries([
            LedgerEntry::income(cc.id, date(2025, 3, 5), m(10_000)),
            LedgerEntry::expense(cc.id, date(2025, 3, 7), m(50_000)),
            LedgerEntry::income(cc.id, date(2025, 3, 20), m(20_000)),
        ]);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        assert!(report.cycles[0].real_balance.is_negative());
        assert_eq!(report.cycles[1].rollover, Money::zero());
        assert_eq!(report.cycles[1].budget, m(20_000));
        assert!(report.cycles.iter().all(|c| !c.rollover.is_negative()));
    }

    #[test]
    fn test_overdue_entry_in_period_counted_once() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = InMemoryLedger::new().with_cost_center(cc.clone()).with_entries([
            LedgerEntry::income(cc.id, date(2025, 3, 5), m(100_000)),
            LedgerEntry::expense(cc.id, date(2025, 3, 10), m(4_000)).with_paid(false),
        ]);
        let report = report(&ledger, &cc, date(2025, 3, 25));

        let (first, second) = (&report.cycles[0], &report.cycles[1]);
        assert_eq!(first.original_allocation, m(96_000));
        assert_eq!(first.real_balance, m(92_000));
        // Still overdue, so it weighs on the second cycle as well
        assert_eq!(second.original_allocation, m(-4_000));
        assert_eq!(second.budget, m(88_000));
    }

    #[test]
    fn test_accumulated_balance_is_prefix_sum() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        for cycle in &report.cycles {
            let mut running = Money::zero();
            for week in &cycle.weeks {
                running += week.balance;
                assert_eq!(week.accumulated_balance, running);
                assert_eq!(week.balance, week.weekly_budget - week.actual_spent);
            }
            let covered: i64 = cycle.weeks.iter().map(|w| w.days_in_period).sum();
            assert_eq!(covered, cycle.total_days);
            assert_eq!(cycle.weeks.first().unwrap().start, cycle.start);
            assert_eq!(cycle.weeks.last().unwrap().end, cycle.end);
        }
    }

    #[test]
    fn test_fetches_once_per_report() {
        let cc = CostCenter::new("Home", Some("1,10,20"));
        let ledger = two_cycle_ledger(&cc);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        assert_eq!(report.cycles.len(), 3);
        assert_eq!(ledger.call_count(LedgerOperation::CostCenter), 1);
        assert_eq!(ledger.call_count(LedgerOperation::Entries), 1);
        assert_eq!(ledger.call_count(LedgerOperation::Overdue), 1);
        assert_eq!(ledger.call_count(LedgerOperation::MonthTotal), 0);
    }

    #[test]
    fn test_overdue_failure_falls_back_to_month_share() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc).failing(LedgerOperation::Overdue);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        // March total: 1800.00 - 400.00, split over two cycles
        for cycle in &report.cycles {
            assert_eq!(cycle.allocation_source, AllocationSource::MonthShare);
            assert_eq!(cycle.original_allocation, m(70_000));
        }
        assert_eq!(ledger.call_count(LedgerOperation::MonthTotal), 1);
    }

    #[test]
    fn test_window_failure_falls_back_to_month_share() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc).failing(LedgerOperation::Entries);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        assert!(!report.spend_available);
        assert_eq!(report.cycles.len(), 2);
        // March total: 1800.00 - 400.00, split over two cycles
        for cycle in &report.cycles {
            assert_eq!(cycle.allocation_source, AllocationSource::MonthShare);
            assert_eq!(cycle.original_allocation, m(70_000));
            assert_eq!(cycle.total_spent, Money::zero());
        }
        assert_eq!(report.cycles[1].rollover, m(70_000));
        assert_eq!(ledger.call_count(LedgerOperation::Entries), 1);
        assert_eq!(ledger.call_count(LedgerOperation::Overdue), 0);
        assert_eq!(ledger.call_count(LedgerOperation::MonthTotal), 1);

        let output = report.format_terminal("$", "%Y-%m-%d");
        assert!(output.contains("Actual spend unavailable"));
    }

    #[test]
    fn test_single_cycle_window_failure_keeps_whole_month() {
        let cc = CostCenter::new("Home", Some("15"));
        let ledger = InMemoryLedger::new()
            .with_cost_center(cc.clone())
            .with_entry(LedgerEntry::income(cc.id, date(2025, 1, 15), m(310_000)))
            .failing(LedgerOperation::Entries);
        let report = report(&ledger, &cc, date(2025, 1, 20));

        assert!(!report.spend_available);
        let cycle = &report.cycles[0];
        assert_eq!(cycle.allocation_source, AllocationSource::WholeMonth);
        assert_eq!(cycle.original_allocation, m(310_000));
        assert_eq!(cycle.real_balance, m(310_000));
    }

    #[test]
    fn test_single_cycle_failure_is_budget_unavailable() {
        let cc = CostCenter::new("Home", None);
        let ledger = InMemoryLedger::new()
            .with_cost_center(cc.clone())
            .failing(LedgerOperation::MonthTotal);
        let err = build_cycle_report(
            &ledger,
            &FixedClock(date(2025, 1, 20)),
            ReportOptions::default(),
            cc.id,
            date(2025, 1, 20),
        )
        .unwrap_err();
        assert!(matches!(err, CycleError::BudgetUnavailable(_)));
    }

    #[test]
    fn test_unknown_cost_center() {
        let ledger = InMemoryLedger::new();
        let err = build_cycle_report(
            &ledger,
            &FixedClock(date(2025, 1, 20)),
            ReportOptions::default(),
            CostCenterId::new(),
            date(2025, 1, 20),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_days_default_to_fifteenth() {
        let cc = CostCenter::new("Home", Some("abc, 40"));
        let ledger = InMemoryLedger::new().with_cost_center(cc.clone());
        let report = report(&ledger, &cc, date(2025, 1, 20));
        assert_eq!(report.recurrence_days.as_slice(), &[15]);
        assert_eq!(report.cycles[0].start, date(2025, 1, 15));
    }

    #[test]
    fn test_warning_threshold_is_configurable() {
        let cc = CostCenter::new("Home", Some("15"));
        // 31-day cycle with a 3100.00 budget: 100.00 a day, 500.00 in week 1
        let ledger = InMemoryLedger::new().with_cost_center(cc.clone()).with_entries([
            LedgerEntry::income(cc.id, date(2025, 1, 1), m(340_000)),
            LedgerEntry::expense(cc.id, date(2025, 1, 16), m(30_000)),
        ]);
        let reference = date(2025, 1, 20);
        let clock = FixedClock(reference);

        let strict = ReportOptions {
            warning_threshold_percent: 50,
            ..ReportOptions::default()
        };
        let built = build_cycle_report(&ledger, &clock, strict, cc.id, reference).unwrap();
        let week = &built.cycles[0].weeks[0];
        assert_eq!(week.weekly_budget, m(50_000));
        assert_eq!(week.status, WeekStatus::Warning);

        let built = build_cycle_report(&ledger, &clock, ReportOptions::default(), cc.id, reference)
            .unwrap();
        assert_eq!(built.cycles[0].weeks[0].status, WeekStatus::Safe);
    }

    #[test]
    fn test_parse_reference_date() {
        assert_eq!(parse_reference_date("2025-03-10").unwrap(), date(2025, 3, 10));
        assert_eq!(parse_reference_date(" 2025-03-10 ").unwrap(), date(2025, 3, 10));
        assert!(parse_reference_date("2025-13-01").unwrap_err().is_invalid_input());
        assert!(parse_reference_date("yesterday").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_export_csv() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv_text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        let weeks: usize = report.cycles.iter().map(|c| c.weeks.len()).sum();
        assert_eq!(lines.len(), weeks + 1);
        assert!(lines[0].starts_with("cycle,cycle_start,cycle_end,cycle_budget"));
        assert!(lines[1].starts_with("1,2025-03-05,2025-03-19,700.00,ledger,1,2025-03-05,2025-03-09,5,"));
    }

    #[test]
    fn test_export_json_and_yaml() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        let json: serde_json::Value = serde_json::from_str(&report.export_json().unwrap()).unwrap();
        assert_eq!(json["cycles"].as_array().unwrap().len(), 2);
        assert_eq!(json["cycles"][1]["rollover"], 40_000);
        assert_eq!(json["recurrence_days"], serde_json::json!([5, 20]));

        let yaml = report.export_yaml().unwrap();
        assert!(yaml.contains("accumulated_rollover: 140000"));
    }

    #[test]
    fn test_format_terminal() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc);
        let output = report(&ledger, &cc, date(2025, 3, 10)).format_terminal("$", "%Y-%m-%d");

        assert!(output.contains("Weekly Control: Home"));
        assert!(!output.contains("Actual spend unavailable"));
        assert!(output.contains("Cycle 1: 2025-03-05 to 2025-03-19 (15 days)  <- current"));
        assert!(output.contains("Cycle 2: 2025-03-20 to 2025-04-04 (16 days)"));
        assert!(output.contains("Rollover: $400.00"));
        assert!(output.contains("Accumulated rollover: $1400.00"));
    }

    #[test]
    fn test_format_terminal_uses_date_format() {
        let cc = CostCenter::new("Home", Some("5,20"));
        let ledger = two_cycle_ledger(&cc);
        let report = report(&ledger, &cc, date(2025, 3, 10));

        let output = report.format_terminal("$", "%d/%m/%Y");
        assert!(output.contains("Cycle 1: 05/03/2025 to 19/03/2025 (15 days)"));
        assert!(output.contains("Reference date: 10/03/2025"));
        assert!(!output.contains("2025-03-05"));

        let fallback = report.format_terminal("$", "%Q");
        assert!(fallback.contains("Cycle 1: 2025-03-05 to 2025-03-19"));
    }
}
