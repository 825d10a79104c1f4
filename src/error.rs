//! Custom error types for cycle-budget
//!
//! This module defines the error hierarchy for the allocator and its
//! adapters using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for cycle-budget operations
#[derive(Error, Debug)]
pub enum CycleError {
    /// Caller contract violations (unparsable reference date, bad arguments)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The whole-month budget could not be computed and no fallback exists
    #[error("Budget unavailable: {0}")]
    BudgetUnavailable(String),

    /// Ledger collaborator failures
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl CycleError {
    /// Create a "not found" error for cost centers
    pub fn cost_center_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Cost center",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<std::io::Error> for CycleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CycleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for cycle-budget operations
pub type CycleResult<T> = Result<T, CycleError>;
