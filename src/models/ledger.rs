//! Ledger entry model
//!
//! Read-only view of the income, expense and investment records kept by the
//! ledger. Amounts are non-negative magnitudes; `kind` carries the direction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CostCenterId, EntryId};
use super::money::Money;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Income,
    Investment,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
            Self::Investment => write!(f, "Investment"),
        }
    }
}

/// How the ledger produced the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// Entered once by hand
    #[default]
    Single,
    /// Generated from a recurrence rule
    Recurring,
    /// One installment of a split purchase
    Installment,
}

/// A single ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,

    pub cost_center_id: CostCenterId,

    /// Posting (or due) date
    pub date: NaiveDate,

    pub amount: Money,

    pub kind: EntryKind,

    #[serde(default)]
    pub record_type: RecordType,

    /// Whether the entry has been settled. Entries written without the
    /// flag are treated as settled, like those built with [`LedgerEntry::new`].
    #[serde(default = "default_paid")]
    pub paid: bool,

    #[serde(default)]
    pub description: String,
}

fn default_paid() -> bool {
    true
}

impl LedgerEntry {
    /// Create a new paid, single entry
    pub fn new(
        cost_center_id: CostCenterId,
        date: NaiveDate,
        amount: Money,
        kind: EntryKind,
    ) -> Self {
        Self {
            id: EntryId::new(),
            cost_center_id,
            date,
            amount,
            kind,
            record_type: RecordType::Single,
            paid: true,
            description: String::new(),
        }
    }

    pub fn expense(cost_center_id: CostCenterId, date: NaiveDate, amount: Money) -> Self {
        Self::new(cost_center_id, date, amount, EntryKind::Expense)
    }

    pub fn income(cost_center_id: CostCenterId, date: NaiveDate, amount: Money) -> Self {
        Self::new(cost_center_id, date, amount, EntryKind::Income)
    }

    pub fn investment(cost_center_id: CostCenterId, date: NaiveDate, amount: Money) -> Self {
        Self::new(cost_center_id, date, amount, EntryKind::Investment)
    }

    /// Builder-style setter for the paid flag
    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Counts toward actual spend
    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Unpaid and dated strictly before `as_of`
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.paid && self.date < as_of
    }

    /// Contribution to a net budget: income adds, expense and investment subtract
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense | EntryKind::Investment => -self.amount,
        }
    }
}
