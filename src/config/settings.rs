//! User settings for cycle-budget
//!
//! Display preferences and the tunables of the weekly control report.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::CycleError;
use crate::reports::{ReportOptions, DEFAULT_WARNING_THRESHOLD_PERCENT};
use crate::services::DEFAULT_LOOKBACK_DAYS;

/// User settings for cycle-budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime pattern for dates in terminal reports. Exports keep ISO dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Look-back tolerance: how far past the reference date a cycle may
    /// start and still be shown
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    /// Spend above this percentage of a week's budget marks it as a warning
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_percent: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_lookback_days() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_warning_threshold() -> u32 {
    DEFAULT_WARNING_THRESHOLD_PERCENT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            lookback_days: default_lookback_days(),
            warning_threshold_percent: default_warning_threshold(),
        }
    }
}

impl Settings {
    /// Report tunables taken from these settings
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            lookback_days: self.lookback_days,
            warning_threshold_percent: self.warning_threshold_percent,
        }
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, CycleError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CycleError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CycleError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), CycleError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CycleError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CycleError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
