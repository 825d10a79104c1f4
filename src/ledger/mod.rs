//! Ledger collaborator port
//!
//! The allocator never talks to a database directly. Everything it reads
//! comes through [`LedgerSource`], which the JSON storage layer and the
//! in-memory test ledger both implement.

pub mod memory;

pub use memory::{InMemoryLedger, LedgerOperation};

use chrono::NaiveDate;

use crate::error::CycleResult;
use crate::models::{CostCenter, CostCenterId, DateRange, LedgerEntry, Money};
use crate::services::allocation::{merge_with_overdue, net_budget};

/// Read-only access to the ledger and cost center registry
pub trait LedgerSource {
    /// Cost center record with its raw recurrence day string
    fn cost_center(&self, id: CostCenterId) -> CycleResult<CostCenter>;

    /// Entries dated within `[from, to]`, inclusive
    fn ledger_entries(
        &self,
        id: CostCenterId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CycleResult<Vec<LedgerEntry>>;

    /// Unpaid entries dated strictly before `as_of`, regardless of window
    fn overdue_unpaid_entries(
        &self,
        id: CostCenterId,
        as_of: NaiveDate,
    ) -> CycleResult<Vec<LedgerEntry>>;

    /// Net budget (income - expense - investment) for a calendar month,
    /// merged with entries overdue as of `as_of`.
    ///
    /// The default runs the two queries above; adapters with a cheaper
    /// aggregate query may override it.
    fn month_total_budget(
        &self,
        id: CostCenterId,
        year: i32,
        month: u32,
        as_of: NaiveDate,
    ) -> CycleResult<Money> {
        let month_range = DateRange::month(year, month);
        let period = self.ledger_entries(id, month_range.start(), month_range.end())?;
        let overdue = self.overdue_unpaid_entries(id, as_of)?;
        Ok(net_budget(&merge_with_overdue(&period, &overdue)))
    }
}
