//! Cost center configuration
//!
//! A cost center's income schedule is stored by the registry as a raw,
//! comma-separated list of days of the month ("5,20"). [`RecurrenceDays`]
//! is the parsed form and is never empty.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CostCenterId;

/// Day used when a cost center has no usable schedule
pub const DEFAULT_RECURRENCE_DAY: u32 = 15;

/// Raw cost center record as kept by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: CostCenterId,

    #[serde(default)]
    pub name: String,

    /// Comma-separated recurrence days, unparsed
    #[serde(default)]
    pub recurrence_days: Option<String>,
}

impl CostCenter {
    pub fn new(name: impl Into<String>, recurrence_days: Option<&str>) -> Self {
        Self {
            id: CostCenterId::new(),
            name: name.into(),
            recurrence_days: recurrence_days.map(str::to_string),
        }
    }

    /// Parsed configuration for the allocator
    pub fn config(&self) -> CostCenterConfig {
        CostCenterConfig {
            id: self.id,
            recurrence_days: RecurrenceDays::parse(self.recurrence_days.as_deref()),
        }
    }
}

/// Parsed cost center configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostCenterConfig {
    pub id: CostCenterId,
    pub recurrence_days: RecurrenceDays,
}

/// Sorted, de-duplicated days of the month in `1..=31`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecurrenceDays(Vec<u32>);

impl RecurrenceDays {
    /// Parse a raw day list.
    ///
    /// Tokens that are not integers in `1..=31` are dropped. An absent value,
    /// or one with no valid token, yields `{15}`.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut days: Vec<u32> = raw
            .unwrap_or_default()
            .split(',')
            .filter_map(|token| token.trim().parse::<u32>().ok())
            .filter(|day| (1..=31).contains(day))
            .collect();
        days.sort_unstable();
        days.dedup();

        if days.is_empty() {
            Self::default()
        } else {
            Self(days)
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }
}

impl Default for RecurrenceDays {
    fn default() -> Self {
        Self(vec![DEFAULT_RECURRENCE_DAY])
    }
}

impl fmt::Display for RecurrenceDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sorts_and_dedups() {
        let days = RecurrenceDays::parse(Some("20, 5,20 ,10"));
        assert_eq!(days.as_slice(), &[5, 10, 20]);
    }

    #[test]
    fn test_parse_defaults_when_missing() {
        assert_eq!(RecurrenceDays::parse(None).as_slice(), &[15]);
        assert_eq!(RecurrenceDays::parse(Some("")).as_slice(), &[15]);
        assert_eq!(RecurrenceDays::parse(Some("  ")).as_slice(), &[15]);
    }

    #[test]
    fn test_parse_drops_invalid_tokens() {
        assert_eq!(RecurrenceDays::parse(Some("0,32,abc,-1")).as_slice(), &[15]);
        assert_eq!(RecurrenceDays::parse(Some("abc,7,40")).as_slice(), &[7]);
        assert_eq!(RecurrenceDays::parse(Some("1,31")).as_slice(), &[1, 31]);
    }

    #[test]
    fn test_never_empty() {
        for raw in [None, Some(""), Some(","), Some("x"), Some("99")] {
            let days = RecurrenceDays::parse(raw);
            assert!(!days.is_empty());
            assert!(days.len() >= 1);
        }
    }

    #[test]
    fn test_cost_center_config() {
        let cc = CostCenter::new("Household", Some("5,20"));
        let config = cc.config();
        assert_eq!(config.id, cc.id);
        assert_eq!(config.recurrence_days.as_slice(), &[5, 20]);
        assert!(!config.recurrence_days.is_single());
    }

    #[test]
    fn test_display() {
        assert_eq!(RecurrenceDays::parse(Some("20, 5")).to_string(), "5, 20");
    }
}
