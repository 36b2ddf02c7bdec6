use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use domain::health::entity::{ErrorHistoryEntry, Module};
use ports::primary::connection_health::ConnectionHealthPort;

#[derive(Debug, Default)]
struct ModuleFailures {
    count: u32,
    history: VecDeque<ErrorHistoryEntry>,
}

/// Transport-side failure accumulator.
///
/// The health registry only accepts full state, so whoever observes the
/// raw subscription errors keeps the running count and a bounded history
/// per module, then forwards the complete picture on every failure.
/// Recovery resets the module's counters and clears its alert.
pub struct FailureTracker {
    health: Arc<dyn ConnectionHealthPort>,
    max_history: usize,
    modules: HashMap<Module, ModuleFailures>,
}

impl FailureTracker {
    pub fn new(health: Arc<dyn ConnectionHealthPort>, max_history: usize) -> Self {
        Self {
            health,
            max_history: max_history.max(1),
            modules: HashMap::new(),
        }
    }

    /// Record one observed failure and report the module's full state.
    /// Returns the module's running error count.
    pub fn on_error(
        &mut self,
        module: Module,
        error: impl Into<String>,
        kind: impl Into<String>,
        timestamp_ns: u64,
    ) -> u32 {
        let error = error.into();
        let state = self.modules.entry(module).or_default();
        state.count = state.count.saturating_add(1);
        state.history.push_back(ErrorHistoryEntry::new(
            timestamp_ns,
            error.clone(),
            kind.into(),
        ));
        while state.history.len() > self.max_history {
            state.history.pop_front();
        }

        let count = state.count;
        let history: Vec<ErrorHistoryEntry> = state.history.iter().cloned().collect();
        self.health.report_failure(module, count, error, history);
        count
    }

    /// Forget the module's failures and clear its alert.
    pub fn on_recovered(&mut self, module: Module) {
        self.modules.remove(&module);
        self.health.report_recovery(module);
    }

    /// Forget every module's failures and clear all alerts.
    pub fn reset(&mut self) {
        self.modules.clear();
        self.health.clear_all();
    }

    pub fn error_count(&self, module: Module) -> u32 {
        self.modules.get(&module).map_or(0, |m| m.count)
    }
}
