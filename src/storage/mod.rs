//! Storage layer for cycle-budget
//!
//! JSON file storage with atomic writes and automatic directory creation.

pub mod file_io;
pub mod init;
pub mod ledger;

pub use file_io::{json_file_valid, read_json, write_json_atomic};
pub use init::initialize_storage;
pub use ledger::{JsonLedgerRepository, LedgerData};

use crate::config::paths::BudgetPaths;
use crate::error::CycleError;

/// Main storage coordinator
pub struct Storage {
    paths: BudgetPaths,
    pub ledger: JsonLedgerRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, CycleError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: JsonLedgerRepository::new(paths.ledger_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), CycleError> {
        self.ledger.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), CycleError> {
        self.ledger.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
