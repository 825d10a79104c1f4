//! cycle-budget - income-cycle budgets with weekly spending control
//!
//! Given the days of the month on which a cost center receives income, this
//! library splits the calendar into budget cycles, breaks each cycle into
//! Monday-to-Sunday weeks, prorates the cycle's budget over those weeks and
//! compares it with actual spend from the ledger. Unspent surplus rolls
//! forward into later cycles.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (money, date ranges, ledger entries, cycles)
//! - `ledger`: The `LedgerSource` port and an in-memory adapter
//! - `services`: Schedule resolution, week partitioning, aggregation, allocation
//! - `reports`: The weekly control report builder and its renderers
//! - `storage`: JSON file storage, itself a `LedgerSource`
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `cycle-budget` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cycle_budget::ledger::InMemoryLedger;
//! use cycle_budget::models::{CostCenter, LedgerEntry, Money};
//! use cycle_budget::reports::{build_cycle_report, ReportOptions};
//! use cycle_budget::time::FixedClock;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let home = CostCenter::new("Home", Some("5,20"));
//! let ledger = InMemoryLedger::new()
//!     .with_cost_center(home.clone())
//!     .with_entry(LedgerEntry::income(home.id, today, Money::from_cents(150_000)));
//!
//! let report = build_cycle_report(
//!     &ledger,
//!     &FixedClock(today),
//!     ReportOptions::default(),
//!     home.id,
//!     today,
//! )
//! .unwrap();
//! assert_eq!(report.cycles.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod time;
pub mod utils;

pub use error::{CycleError, CycleResult};
pub use ledger::LedgerSource;
pub use reports::{build_cycle_report, CycleReport, CycleReportBuilder, ReportOptions};
