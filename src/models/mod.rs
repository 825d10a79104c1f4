//! Core data models for cycle-budget
//!
//! Ledger-side records (entries, cost centers) and the computed cycle and
//! week views produced by the report builder.

pub mod cost_center;
pub mod cycle;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod period;

pub use cost_center::{CostCenter, CostCenterConfig, RecurrenceDays, DEFAULT_RECURRENCE_DAY};
pub use cycle::{AllocationSource, Cycle, CycleWindow, Week, WeekStatus};
pub use ids::{CostCenterId, EntryId};
pub use ledger::{EntryKind, LedgerEntry, RecordType};
pub use money::Money;
pub use period::DateRange;
