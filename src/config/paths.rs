//! Path management for cycle-budget
//!
//! ## Path Resolution Order
//!
//! 1. `CYCLE_BUDGET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/cycle-budget` on Linux, `%APPDATA%\cycle-budget\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CycleError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CYCLE_BUDGET_DATA_DIR";

/// Manages all paths used by cycle-budget
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CycleError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to ledger.json (cost centers and entries)
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CycleError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CycleError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CycleError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if cycle-budget has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, CycleError> {
    ProjectDirs::from("", "", "cycle-budget")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CycleError::Config("Could not determine a home directory".into()))
}
