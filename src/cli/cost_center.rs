//! Cost center CLI commands

use clap::Subcommand;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

use crate::error::CycleResult;
use crate::models::CostCenter;
use crate::storage::Storage;

/// Cost center subcommands
#[derive(Subcommand, Debug)]
pub enum CostCenterCommands {
    /// List cost centers with their income days
    List,
}

/// Handle a cost center command
pub fn handle_cost_center_command(storage: &Storage, cmd: CostCenterCommands) -> CycleResult<()> {
    match cmd {
        CostCenterCommands::List => {
            let cost_centers = storage.ledger.list_cost_centers()?;
            let mut rows = Vec::with_capacity(cost_centers.len());
            for cc in cost_centers {
                let entries = storage.ledger.entry_count(cc.id)?;
                rows.push((cc, entries));
            }
            print!("{}", format_cost_center_list(&rows));
        }
    }

    Ok(())
}

/// Format cost centers and their entry counts as a table
pub fn format_cost_center_list(rows: &[(CostCenter, usize)]) -> String {
    if rows.is_empty() {
        return "No cost centers found.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Income days", "Entries"]);
    for (cc, entries) in rows {
        builder.push_record([
            cc.id.to_string(),
            cc.name.clone(),
            cc.config().recurrence_days.to_string(),
            entries.to_string(),
        ]);
    }

    let mut table = Table::from(builder);
    table.with(Style::rounded());
    format!("{}\n", table)
}
