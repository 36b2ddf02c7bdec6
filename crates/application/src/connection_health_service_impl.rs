use std::sync::{Arc, RwLock};

use domain::common::entity::Severity;
use domain::health::engine::AlertRegistry;
use domain::health::entity::{
    AlertRecord, ErrorHistoryEntry, ExternalAlert, HealthReport, Module, ModuleStatus,
};
use domain::health::{presenter, scorer};
use ports::primary::connection_health::ConnectionHealthPort;
use ports::secondary::metrics_port::MetricsPort;

/// Source of "now" in nanoseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

pub fn now_ns() -> u64 {
    let elapsed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

/// Application-level connection health service.
///
/// Wraps the domain `AlertRegistry` with thread-safe access (`RwLock`),
/// logging and metrics updates. Implements `ConnectionHealthPort` for the
/// transport and dashboard sides. Every mutation happens under a single
/// write guard, so readers only ever see whole records.
pub struct ConnectionHealthAppService {
    registry: RwLock<AlertRegistry>,
    metrics: Arc<dyn MetricsPort>,
    clock: Clock,
}

impl ConnectionHealthAppService {
    pub fn new(metrics: Arc<dyn MetricsPort>) -> Self {
        Self::with_clock(metrics, Arc::new(now_ns))
    }

    pub fn with_clock(metrics: Arc<dyn MetricsPort>, clock: Clock) -> Self {
        Self {
            registry: RwLock::new(AlertRegistry::new()),
            metrics,
            clock,
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, AlertRegistry> {
        self.registry
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AlertRegistry> {
        self.registry
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Push active-alert gauges and the health score for the given state.
    fn update_metrics(&self, registry: &AlertRegistry) {
        for severity in Severity::ALL {
            let count = registry.iter().filter(|r| r.severity == severity).count();
            self.metrics
                .set_active_alerts(severity.as_str(), count as u64);
        }
        let report = scorer::score(registry.iter());
        self.metrics.set_health_score(u64::from(report.score));
    }
}

impl ConnectionHealthPort for ConnectionHealthAppService {
    fn report_failure(
        &self,
        module: Module,
        error_count: u32,
        last_error: String,
        error_history: Vec<ErrorHistoryEntry>,
    ) {
        let now = (self.clock)();
        let mut registry = self.write();
        let previous = registry.get(module).map(|r| r.severity);

        let record = registry.record_alert(module, error_count, last_error, error_history, now);
        let severity = record.severity;

        match previous {
            None => tracing::info!(
                module = %module,
                alert_id = %record.id,
                error_count,
                severity = %severity,
                last_error = %record.last_error,
                "realtime connection alert raised"
            ),
            Some(prev) if severity == Severity::High && prev != Severity::High => {
                tracing::warn!(
                    module = %module,
                    error_count,
                    from = %prev,
                    to = %severity,
                    "realtime connection alert escalated"
                );
            }
            Some(_) => tracing::debug!(
                module = %module,
                error_count,
                severity = %severity,
                "realtime connection alert updated"
            ),
        }

        self.metrics
            .record_failure_report(module.as_str(), severity.as_str());
        self.update_metrics(&registry);
    }

    fn report_recovery(&self, module: Module) {
        let mut registry = self.write();
        if let Some(cleared) = registry.clear_alert(module) {
            tracing::info!(
                module = %module,
                error_count = cleared.error_count,
                "realtime connection recovered, alert cleared"
            );
            self.metrics.record_recovery(module.as_str());
            self.update_metrics(&registry);
        }
    }

    fn clear_all(&self) {
        let mut registry = self.write();
        let cleared = registry.clear_all();
        tracing::info!(cleared, "all realtime connection alerts cleared");
        self.update_metrics(&registry);
    }

    fn list_alerts(&self) -> Vec<AlertRecord> {
        self.read().list_alerts()
    }

    fn list_external_alerts(&self) -> Vec<ExternalAlert> {
        let now = (self.clock)();
        presenter::present_all(self.read().iter(), now)
    }

    fn get_health(&self) -> HealthReport {
        scorer::score(self.read().iter())
    }

    fn get_module_status(&self, module: Module) -> ModuleStatus {
        self.read().get_module_status(module)
    }

    fn has_active(&self) -> bool {
        self.read().has_active()
    }
}
