//! Ledger aggregation
//!
//! Entries for a report are fetched once, for a window covering every
//! cycle, and then bucketed by date in memory.

use tracing::debug;

use crate::error::CycleResult;
use crate::ledger::LedgerSource;
use crate::models::{CostCenterId, DateRange, LedgerEntry, Money};

/// Fetches ledger windows
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Fetch every entry of `cost_center` dated within `window` in one query
    pub fn fetch<S: LedgerSource + ?Sized>(
        source: &S,
        cost_center: CostCenterId,
        window: DateRange,
    ) -> CycleResult<LedgerSnapshot> {
        let entries: Vec<LedgerEntry> = source
            .ledger_entries(cost_center, window.start(), window.end())?
            .into_iter()
            .filter(|e| window.contains(e.date))
            .collect();

        debug!(
            cost_center = %cost_center,
            window = %window,
            entries = entries.len(),
            "fetched ledger window"
        );
        Ok(LedgerSnapshot::new(entries))
    }
}

/// Entries of one window, held for the duration of a report.
///
/// The default snapshot is empty; reports use it when the window query
/// failed and spend cannot be measured.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    entries: Vec<LedgerEntry>,
}

impl LedgerSnapshot {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dated within `range`, inclusive on both ends
    pub fn entries_in(&self, range: DateRange) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(move |e| range.contains(e.date))
    }

    /// Total expense dated within `range`
    pub fn spent_in(&self, range: DateRange) -> Money {
        self.entries_in(range)
            .filter(|e| e.is_expense())
            .map(|e| e.amount)
            .sum()
    }
}
