use anyhow::Result;
use clap::{Parser, Subcommand};

use cycle_budget::cli::{
    handle_cost_center_command, handle_report_command, CostCenterCommands, ReportCommands,
};
use cycle_budget::config::{paths::BudgetPaths, settings::Settings};
use cycle_budget::storage::{json_file_valid, Storage};
use cycle_budget::utils::init_tracing;

#[derive(Parser)]
#[command(
    name = "cycle-budget",
    author = "Kaylee Beyene",
    version,
    about = "Income-cycle budgets with weekly spending control",
    long_about = "cycle-budget splits the calendar into budget cycles between a cost \
                  center's income days, prorates each cycle's budget over its weeks \
                  and tracks actual spend against it, rolling surplus forward."
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and an empty ledger
    Init,

    /// Show current configuration and paths
    Config,

    /// Report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Cost center commands
    #[command(subcommand, alias = "cc")]
    CostCenter(CostCenterCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing cycle-budget at: {}", paths.base_dir().display());
            cycle_budget::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Add cost centers and entries to {}", paths.ledger_file().display());
            println!("then run 'cycle-budget report weekly --cost-center <NAME>'.");
        }
        Some(Commands::Config) => {
            let ledger_state = if !paths.ledger_file().exists() {
                "missing"
            } else if json_file_valid(paths.ledger_file()) {
                "ok"
            } else {
                "invalid"
            };

            println!("cycle-budget Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Ledger file:      {} ({})", paths.ledger_file().display(), ledger_state);
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Look-back days:    {}", settings.lookback_days);
            println!("  Warning threshold: {}%", settings.warning_threshold_percent);
        }
        Some(Commands::Report(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::CostCenter(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_cost_center_command(&storage, cmd)?;
        }
        None => {
            println!("cycle-budget - income-cycle budgets with weekly spending control");
            println!();
            println!("Run 'cycle-budget --help' for usage information.");
        }
    }

    Ok(())
}

fn open_storage(paths: &BudgetPaths) -> Result<Storage> {
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    Ok(storage)
}
