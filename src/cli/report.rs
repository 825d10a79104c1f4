//! CLI commands for reports
//!
//! Builds the weekly control report and renders or exports it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::error::{CycleError, CycleResult};
use crate::reports::{parse_reference_date, CycleReport, CycleReportBuilder};
use crate::storage::Storage;
use crate::time::{Clock, SystemClock};

/// Output format for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable tables
    #[default]
    Terminal,
    Json,
    Yaml,
    /// One row per week
    Csv,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Weekly control: budget cycles, their weeks and rollover
    #[command(alias = "control")]
    Weekly {
        /// Cost center name or ID
        #[arg(short, long)]
        cost_center: String,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Terminal)]
        format: ReportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> CycleResult<()> {
    match cmd {
        ReportCommands::Weekly {
            cost_center,
            date,
            format,
            output,
        } => handle_weekly_report(storage, settings, &cost_center, date, format, output),
    }
}

fn handle_weekly_report(
    storage: &Storage,
    settings: &Settings,
    cost_center: &str,
    date: Option<String>,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> CycleResult<()> {
    let clock = SystemClock;
    let reference: NaiveDate = match date {
        Some(raw) => parse_reference_date(&raw)?,
        None => clock.today(),
    };

    let cost_center = storage.ledger.find_cost_center(cost_center)?;
    let report = CycleReportBuilder::new(&storage.ledger, &clock, settings.report_options())
        .build(cost_center.id, reference)?;

    match output {
        Some(path) => {
            write_report(&report, settings, format, create_output(&path)?)?;
            println!("Weekly control report exported to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report(&report, settings, format, stdout.lock())?;
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> CycleResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        CycleError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Render `report` in `format` into `writer`
pub fn write_report<W: Write>(
    report: &CycleReport,
    settings: &Settings,
    format: ReportFormat,
    mut writer: W,
) -> CycleResult<()> {
    let text = match format {
        ReportFormat::Csv => return report.export_csv(writer),
        ReportFormat::Terminal => {
            report.format_terminal(&settings.currency_symbol, &settings.date_format)
        }
        ReportFormat::Json => report.export_json()? + "\n",
        ReportFormat::Yaml => report.export_yaml()?,
    };

    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| CycleError::Export(e.to_string()))
}
