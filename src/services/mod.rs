//! Service layer for cycle-budget
//!
//! The components of the weekly control pipeline. Each is usable on its
//! own; the report builder in `crate::reports` wires them together.

pub mod aggregation;
pub mod allocation;
pub mod schedule;
pub mod weeks;

pub use aggregation::{LedgerAggregator, LedgerSnapshot};
pub use allocation::{carry_forward, merge_with_overdue, net_budget, Allocation, CycleBudgetAllocator};
pub use schedule::{adjust_to_business_day, PaymentScheduleResolver, DEFAULT_LOOKBACK_DAYS};
pub use weeks::WeekPartitioner;
