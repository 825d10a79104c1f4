//! Cycle budget allocation
//!
//! A cycle's original allocation is the net (income - expense - investment)
//! of its own entries merged with every entry still unpaid before today.
//! When either the cycle's entries or the overdue set cannot be read, the
//! cycle gets an equal share of the reference month's total instead.

use std::cell::OnceCell;
use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{CycleError, CycleResult};
use crate::ledger::LedgerSource;
use crate::models::period::year_month;
use crate::models::{AllocationSource, CostCenterId, DateRange, LedgerEntry, Money};

use super::aggregation::LedgerSnapshot;

/// Merge a period's entries with the overdue set, keeping each entry id once.
///
/// Period entries come first, in their original order.
pub fn merge_with_overdue(period: &[LedgerEntry], overdue: &[LedgerEntry]) -> Vec<LedgerEntry> {
    let mut seen = HashSet::with_capacity(period.len() + overdue.len());
    period
        .iter()
        .chain(overdue)
        .filter(|e| seen.insert(e.id))
        .cloned()
        .collect()
}

/// Income minus expense minus investment
pub fn net_budget<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Money {
    entries.into_iter().map(LedgerEntry::signed_amount).sum()
}

/// Add a cycle's real balance to the running rollover if it is a surplus.
///
/// An overspent cycle leaves the rollover unchanged.
pub fn carry_forward(accumulated: Money, real_balance: Money) -> Money {
    if real_balance.is_positive() {
        accumulated + real_balance
    } else {
        accumulated
    }
}

/// A cycle's original allocation and how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub original: Money,
    pub source: AllocationSource,
}

impl Allocation {
    fn new(original: Money, source: AllocationSource) -> Self {
        Self { original, source }
    }
}

/// Computes original allocations for the cycles of one report.
///
/// The overdue set and the month total are each fetched at most once,
/// however many cycles ask for them.
pub struct CycleBudgetAllocator<'a, S: LedgerSource + ?Sized> {
    source: &'a S,
    cost_center: CostCenterId,
    reference: NaiveDate,
    today: NaiveDate,
    cycle_count: usize,
    overdue: OnceCell<Result<Vec<LedgerEntry>, String>>,
    month_total: OnceCell<Option<Money>>,
}

impl<'a, S: LedgerSource + ?Sized> CycleBudgetAllocator<'a, S> {
    pub fn new(
        source: &'a S,
        cost_center: CostCenterId,
        reference: NaiveDate,
        today: NaiveDate,
        cycle_count: usize,
    ) -> Self {
        Self {
            source,
            cost_center,
            reference,
            today,
            cycle_count: cycle_count.max(1),
            overdue: OnceCell::new(),
            month_total: OnceCell::new(),
        }
    }

    /// Allocation for a report with a single cycle: the reference month's
    /// total. There is no fallback here.
    pub fn whole_month(&self) -> CycleResult<Allocation> {
        let (year, month) = year_month(self.reference);
        let total = self
            .source
            .month_total_budget(self.cost_center, year, month, self.today)
            .map_err(|e| CycleError::BudgetUnavailable(e.to_string()))?;
        Ok(Allocation::new(total, AllocationSource::WholeMonth))
    }

    /// Allocation for one of several cycles. Never fails.
    ///
    /// `period` is `None` when the report's ledger window could not be read.
    pub fn allocate(&self, range: DateRange, period: Option<&LedgerSnapshot>) -> Allocation {
        let Some(snapshot) = period else {
            warn!(cycle = %range, "cycle entries unavailable, falling back to month share");
            return self.month_share(range);
        };

        match self.overdue() {
            Ok(overdue) => {
                let period: Vec<LedgerEntry> = snapshot.entries_in(range).cloned().collect();
                let original = net_budget(&merge_with_overdue(&period, overdue));
                Allocation::new(original, AllocationSource::Ledger)
            }
            Err(cause) => {
                warn!(
                    cycle = %range,
                    cause = %cause,
                    "overdue entries unavailable, falling back to month share"
                );
                self.month_share(range)
            }
        }
    }

    fn month_share(&self, range: DateRange) -> Allocation {
        match self.month_total() {
            Some(total) => Allocation::new(
                total.prorate(1, self.cycle_count as i64),
                AllocationSource::MonthShare,
            ),
            None => {
                warn!(cycle = %range, "month total unavailable, allocating zero");
                Allocation::new(Money::zero(), AllocationSource::Unavailable)
            }
        }
    }

    fn overdue(&self) -> Result<&Vec<LedgerEntry>, &String> {
        self.overdue
            .get_or_init(|| {
                self.source
                    .overdue_unpaid_entries(self.cost_center, self.today)
                    .map_err(|e| e.to_string())
            })
            .as_ref()
    }

    fn month_total(&self) -> Option<Money> {
        *self.month_total.get_or_init(|| {
            let (year, month) = year_month(self.reference);
            match self
                .source
                .month_total_budget(self.cost_center, year, month, self.today)
            {
                Ok(total) => Some(total),
                Err(e) => {
                    warn!(cause = %e, "month total query failed");
                    None
                }
            }
        })
    }
}
