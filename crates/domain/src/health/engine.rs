use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::classifier::classify;
use super::entity::{AlertRecord, ErrorHistoryEntry, Module, ModuleStatus};

/// In-memory registry holding at most one alert record per module.
///
/// Reports carry the caller's full view of a module's failures (count and
/// history), not a delta: the registry never accumulates counts itself.
/// Callers needing shared access wrap the registry in a lock.
#[derive(Debug, Default, Clone)]
pub struct AlertRegistry {
    records: HashMap<Module, AlertRecord>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the alert for `module`.
    ///
    /// An existing record keeps its id and `first_occurrence_ns`; a new one
    /// starts at `now_ns`. Severity is recomputed from `error_count`.
    /// Returns the stored record.
    pub fn record_alert(
        &mut self,
        module: Module,
        error_count: u32,
        last_error: String,
        error_history: Vec<ErrorHistoryEntry>,
        now_ns: u64,
    ) -> &AlertRecord {
        let severity = classify(error_count);
        let slot = self.records.entry(module);
        let first_occurrence_ns = match &slot {
            Entry::Occupied(existing) => existing.get().first_occurrence_ns,
            Entry::Vacant(_) => now_ns,
        };

        let record = AlertRecord {
            id: module.alert_id(),
            module,
            error_count,
            last_error,
            error_history,
            first_occurrence_ns,
            severity,
        };

        // Replace the whole record so readers never see mixed fields.
        match slot {
            Entry::Occupied(mut existing) => {
                existing.insert(record);
                existing.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(record),
        }
    }

    /// Remove the alert for `module`. Returns the removed record, if any.
    pub fn clear_alert(&mut self, module: Module) -> Option<AlertRecord> {
        self.records.remove(&module)
    }

    /// Remove every alert. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    /// Owned snapshot of all records, in no particular order.
    pub fn list_alerts(&self) -> Vec<AlertRecord> {
        self.records.values().cloned().collect()
    }

    pub fn get(&self, module: Module) -> Option<&AlertRecord> {
        self.records.get(&module)
    }

    /// Iterate records without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.values()
    }

    pub fn has_active(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Status for `module`; the healthy sentinel when no alert exists.
    pub fn get_module_status(&self, module: Module) -> ModuleStatus {
        self.records
            .get(&module)
            .map_or_else(ModuleStatus::healthy, ModuleStatus::from)
    }
}
