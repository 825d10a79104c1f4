//! Reports module for cycle-budget
//!
//! The weekly control report: budget cycles with their calendar weeks,
//! prorated budgets, actual spend and rollover.

pub mod cycle_report;

pub use cycle_report::{
    build_cycle_report, parse_reference_date, CycleReport, CycleReportBuilder, ReportOptions,
    DEFAULT_WARNING_THRESHOLD_PERCENT,
};
