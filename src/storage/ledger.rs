//! Ledger repository for JSON storage
//!
//! Manages loading and saving cost centers and ledger entries to
//! ledger.json, and serves them to the report builder as a [`LedgerSource`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};
use crate::ledger::LedgerSource;
use crate::models::{CostCenter, CostCenterId, DateRange, LedgerEntry, Money};
use crate::services::allocation::net_budget;

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of ledger.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerData {
    #[serde(default)]
    pub cost_centers: Vec<CostCenter>,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

#[derive(Debug, Default)]
struct LedgerState {
    cost_centers: HashMap<CostCenterId, CostCenter>,
    /// Entries per cost center, sorted by date
    entries: HashMap<CostCenterId, Vec<LedgerEntry>>,
}

/// Repository for ledger persistence
pub struct JsonLedgerRepository {
    path: PathBuf,
    state: RwLock<LedgerState>,
}

fn lock_error(e: impl std::fmt::Display) -> CycleError {
    CycleError::Storage(format!("Failed to acquire ledger lock: {}", e))
}

impl JsonLedgerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Load ledger.json, replacing anything held in memory
    pub fn load(&self) -> CycleResult<()> {
        let file_data: LedgerData = read_json(&self.path)?;
        let mut state = self.state.write().map_err(lock_error)?;

        state.cost_centers = file_data
            .cost_centers
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        state.entries.clear();
        for entry in file_data.entries {
            state
                .entries
                .entry(entry.cost_center_id)
                .or_default()
                .push(entry);
        }
        for entries in state.entries.values_mut() {
            entries.sort_by_key(|e| e.date);
        }

        Ok(())
    }

    /// Save the ledger to disk
    pub fn save(&self) -> CycleResult<()> {
        let state = self.state.read().map_err(lock_error)?;

        let mut cost_centers: Vec<_> = state.cost_centers.values().cloned().collect();
        cost_centers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let mut entries: Vec<_> = state.entries.values().flatten().cloned().collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

        write_json_atomic(
            &self.path,
            &LedgerData {
                cost_centers,
                entries,
            },
        )
    }

    /// All cost centers, ordered by name
    pub fn list_cost_centers(&self) -> CycleResult<Vec<CostCenter>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut cost_centers: Vec<_> = state.cost_centers.values().cloned().collect();
        cost_centers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(cost_centers)
    }

    /// Find a cost center by full id, short display id or name
    pub fn find_cost_center(&self, identifier: &str) -> CycleResult<CostCenter> {
        let state = self.state.read().map_err(lock_error)?;

        if let Ok(id) = identifier.parse::<CostCenterId>() {
            if let Some(cc) = state.cost_centers.get(&id) {
                return Ok(cc.clone());
            }
        }

        let needle = identifier.trim().to_lowercase();
        state
            .cost_centers
            .values()
            .find(|cc| cc.id.to_string() == needle || cc.name.to_lowercase() == needle)
            .cloned()
            .ok_or_else(|| CycleError::cost_center_not_found(identifier))
    }

    /// Insert or update a cost center
    pub fn upsert_cost_center(&self, cost_center: CostCenter) -> CycleResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.cost_centers.insert(cost_center.id, cost_center);
        Ok(())
    }

    /// Add a ledger entry
    pub fn add_entry(&self, entry: LedgerEntry) -> CycleResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let entries = state.entries.entry(entry.cost_center_id).or_default();
        let position = entries.partition_point(|e| e.date <= entry.date);
        entries.insert(position, entry);
        Ok(())
    }

    /// Number of entries recorded for a cost center
    pub fn entry_count(&self, id: CostCenterId) -> CycleResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.entries.get(&id).map(Vec::len).unwrap_or(0))
    }

    fn scan<F>(&self, id: CostCenterId, keep: F) -> CycleResult<Vec<LedgerEntry>>
    where
        F: Fn(&LedgerEntry) -> bool,
    {
        let state = self.state.read().map_err(|e| CycleError::Ledger(e.to_string()))?;
        Ok(state
            .entries
            .get(&id)
            .map(|entries| entries.iter().filter(|e| keep(e)).cloned().collect())
            .unwrap_or_default())
    }
}

impl LedgerSource for JsonLedgerRepository {
    fn cost_center(&self, id: CostCenterId) -> CycleResult<CostCenter> {
        let state = self.state.read().map_err(|e| CycleError::Ledger(e.to_string()))?;
        state
            .cost_centers
            .get(&id)
            .cloned()
            .ok_or_else(|| CycleError::cost_center_not_found(id.to_string()))
    }

    fn ledger_entries(
        &self,
        id: CostCenterId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CycleResult<Vec<LedgerEntry>> {
        self.scan(id, |e| e.date >= from && e.date <= to)
    }

    fn overdue_unpaid_entries(
        &self,
        id: CostCenterId,
        as_of: NaiveDate,
    ) -> CycleResult<Vec<LedgerEntry>> {
        self.scan(id, |e| e.is_overdue(as_of))
    }

    // One pass over the stored entries, so an entry that is both in the
    // month and overdue is counted once.
    fn month_total_budget(
        &self,
        id: CostCenterId,
        year: i32,
        month: u32,
        as_of: NaiveDate,
    ) -> CycleResult<Money> {
        let month_range = DateRange::month(year, month);
        let entries = self.scan(id, |e| month_range.contains(e.date) || e.is_overdue(as_of))?;
        Ok(net_budget(&entries))
    }
}
