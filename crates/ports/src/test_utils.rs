use std::sync::Mutex;

use crate::secondary::metrics_port::{ConfigMetrics, ConnectionMetrics};

/// No-op implementation of all metrics sub-traits for use in tests.
///
/// All methods inherit the default no-op implementations from the sub-traits.
pub struct NoopMetrics;

impl ConnectionMetrics for NoopMetrics {}
impl ConfigMetrics for NoopMetrics {}

/// Metrics double that records every connection metric call, in order.
#[derive(Default)]
pub struct RecordingMetrics {
    pub failures: Mutex<Vec<(String, String)>>,
    pub recoveries: Mutex<Vec<String>>,
    pub active: Mutex<Vec<(String, u64)>>,
    pub scores: Mutex<Vec<u64>>,
}

impl RecordingMetrics {
    /// Most recent health score gauge value.
    pub fn last_score(&self) -> Option<u64> {
        self.scores
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Most recent active-alert gauge value for `severity`.
    pub fn last_active(&self, severity: &str) -> Option<u64> {
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(s, _)| s == severity)
            .map(|(_, n)| *n)
    }
}

impl ConnectionMetrics for RecordingMetrics {
    fn record_failure_report(&self, module: &str, severity: &str) {
        self.failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((module.to_string(), severity.to_string()));
    }

    fn record_recovery(&self, module: &str) {
        self.recoveries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(module.to_string());
    }

    fn set_active_alerts(&self, severity: &str, count: u64) {
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((severity.to_string(), count));
    }

    fn set_health_score(&self, score: u64) {
        self.scores
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(score);
    }
}

impl ConfigMetrics for RecordingMetrics {}
