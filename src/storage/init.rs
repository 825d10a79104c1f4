//! Storage initialization
//!
//! Handles first-run setup: directories, default settings and an empty ledger.

use crate::config::paths::BudgetPaths;
use crate::config::Settings;
use crate::error::CycleError;

use super::file_io::write_json_atomic;
use super::ledger::LedgerData;

/// Initialize storage for a fresh installation.
///
/// Existing files are left untouched, so running it twice is harmless.
pub fn initialize_storage(paths: &BudgetPaths) -> Result<(), CycleError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.ledger_file().exists() {
        write_json_atomic(paths.ledger_file(), &LedgerData::default())?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BudgetPaths) -> bool {
    !paths.settings_file().exists() || !paths.ledger_file().exists()
}
