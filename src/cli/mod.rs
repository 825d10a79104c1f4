//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report builder and storage.

pub mod cost_center;
pub mod report;

pub use cost_center::{handle_cost_center_command, CostCenterCommands};
pub use report::{handle_report_command, write_report, ReportCommands, ReportFormat};
