//! Vector-backed ledger
//!
//! Holds cost centers and entries in memory. Useful for embedding and for
//! tests, which can make individual operations fail and inspect how many
//! round-trips a report needed.

use std::cell::RefCell;
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{CycleError, CycleResult};
use crate::models::{CostCenter, CostCenterId, DateRange, LedgerEntry, Money};
use crate::services::allocation::{merge_with_overdue, net_budget};

use super::LedgerSource;

/// The operations a [`LedgerSource`] exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerOperation {
    CostCenter,
    Entries,
    Overdue,
    MonthTotal,
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    cost_centers: Vec<CostCenter>,
    entries: Vec<LedgerEntry>,
    failing: HashSet<LedgerOperation>,
    calls: RefCell<Vec<LedgerOperation>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cost_center(mut self, cost_center: CostCenter) -> Self {
        self.cost_centers.push(cost_center);
        self
    }

    pub fn with_entry(mut self, entry: LedgerEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = LedgerEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Make `operation` return a ledger error from now on
    pub fn failing(mut self, operation: LedgerOperation) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Number of times `operation` has been called
    pub fn call_count(&self, operation: LedgerOperation) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|op| **op == operation)
            .count()
    }

    fn record(&self, operation: LedgerOperation) -> CycleResult<()> {
        self.calls.borrow_mut().push(operation);
        if self.failing.contains(&operation) {
            return Err(CycleError::Ledger(format!(
                "{:?} query failed (injected)",
                operation
            )));
        }
        Ok(())
    }

    fn entries_for(&self, id: CostCenterId) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(move |e| e.cost_center_id == id)
    }
}

impl LedgerSource for InMemoryLedger {
    fn cost_center(&self, id: CostCenterId) -> CycleResult<CostCenter> {
        self.record(LedgerOperation::CostCenter)?;
        self.cost_centers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CycleError::cost_center_not_found(id.to_string()))
    }

    fn ledger_entries(
        &self,
        id: CostCenterId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CycleResult<Vec<LedgerEntry>> {
        self.record(LedgerOperation::Entries)?;
        Ok(self
            .entries_for(id)
            .filter(|e| e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }

    fn overdue_unpaid_entries(
        &self,
        id: CostCenterId,
        as_of: NaiveDate,
    ) -> CycleResult<Vec<LedgerEntry>> {
        self.record(LedgerOperation::Overdue)?;
        Ok(self
            .entries_for(id)
            .filter(|e| e.is_overdue(as_of))
            .cloned()
            .collect())
    }

    // Computed from the stored data directly so its failure can be
    // injected independently of the other two queries.
    fn month_total_budget(
        &self,
        id: CostCenterId,
        year: i32,
        month: u32,
        as_of: NaiveDate,
    ) -> CycleResult<Money> {
        self.record(LedgerOperation::MonthTotal)?;
        let month_range = DateRange::month(year, month);
        let period: Vec<LedgerEntry> = self
            .entries_for(id)
            .filter(|e| month_range.contains(e.date))
            .cloned()
            .collect();
        let overdue: Vec<LedgerEntry> = self
            .entries_for(id)
            .filter(|e| e.is_overdue(as_of))
            .cloned()
            .collect();
        Ok(net_budget(&merge_with_overdue(&period, &overdue)))
    }
}
