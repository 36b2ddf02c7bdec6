use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use application::connection_health_service_impl::ConnectionHealthAppService;
use application::failure_tracker::FailureTracker;
use domain::health::entity::{ExternalAlert, HealthReport, Module, ModuleStatus};
use ports::primary::connection_health::ConnectionHealthPort;
use ports::secondary::metrics_port::MetricsPort;
use serde::Serialize;
use tracing::{debug, info};

use crate::scenario::ReplayEvent;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Per-module line of the replay report.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRow {
    pub module: Module,
    pub display_name: &'static str,
    #[serde(flatten)]
    pub status: ModuleStatus,
}

/// Final state of the registry after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub health: HealthReport,
    /// Sorted by alert id.
    pub alerts: Vec<ExternalAlert>,
    pub modules: Vec<ModuleRow>,
    pub applied: usize,
    pub skipped: usize,
}

/// Feed `events` through a fresh failure tracker and registry.
///
/// The registry's clock follows the scenario: before each event it is set
/// to `start_ns + offset`, and the report is rendered at the last event's
/// time. Events for modules outside `tracked` are skipped.
pub fn run(
    events: &[ReplayEvent],
    tracked: &[Module],
    max_history: usize,
    metrics: Arc<dyn MetricsPort>,
    start_ns: u64,
) -> ReplayReport {
    let now = Arc::new(AtomicU64::new(start_ns));
    let clock_now = Arc::clone(&now);
    let service = Arc::new(ConnectionHealthAppService::with_clock(
        metrics,
        Arc::new(move || clock_now.load(Ordering::Relaxed)),
    ));
    let mut tracker = FailureTracker::new(
        Arc::clone(&service) as Arc<dyn ConnectionHealthPort>,
        max_history,
    );

    let mut applied = 0;
    let mut skipped = 0;

    for event in events {
        let at_ns = start_ns.saturating_add(event.offset_secs().saturating_mul(NANOS_PER_SEC));
        now.store(at_ns, Ordering::Relaxed);

        if let Some(module) = event.module()
            && !tracked.contains(&module)
        {
            debug!(module = module.as_str(), "event for untracked module skipped");
            skipped += 1;
            continue;
        }

        match event {
            ReplayEvent::Failure {
                module,
                error,
                kind,
                ..
            } => {
                tracker.on_error(*module, error.as_str(), kind.as_str(), at_ns);
            }
            ReplayEvent::Recovery { module, .. } => tracker.on_recovered(*module),
            ReplayEvent::ClearAll { .. } => tracker.reset(),
        }
        applied += 1;
    }

    let mut alerts = service.list_external_alerts();
    alerts.sort_by(|a, b| a.id.cmp(&b.id));

    let modules = tracked
        .iter()
        .map(|&module| ModuleRow {
            module,
            display_name: module.display_name(),
            status: service.get_module_status(module),
        })
        .collect();

    let health = service.get_health();
    info!(
        applied,
        skipped,
        active_alerts = alerts.len(),
        score = health.score,
        status = health.status.as_str(),
        "replay finished"
    );

    ReplayReport {
        health,
        alerts,
        modules,
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::common::entity::Severity;
    use domain::health::entity::{ExternalAlertType, HealthStatus};
    use ports::test_utils::{NoopMetrics, RecordingMetrics};

    const START: u64 = 1_700_000_000 * NANOS_PER_SEC;

    fn failure(module: Module, offset_secs: u64) -> ReplayEvent {
        ReplayEvent::Failure {
            module,
            error: format!("{} channel closed", module.as_str()),
            kind: "CLOSED".to_string(),
            offset_secs,
        }
    }

    fn replay(events: &[ReplayEvent]) -> ReplayReport {
        run(events, &Module::ALL, 50, Arc::new(NoopMetrics), START)
    }

    #[test]
    fn empty_replay_is_healthy() {
        let report = replay(&[]);
        assert_eq!(report.health.score, 10);
        assert_eq!(report.health.status, HealthStatus::Healthy);
        assert!(report.alerts.is_empty());
        assert_eq!(report.modules.len(), 6);
        assert!(report.modules.iter().all(|m| !m.status.has_alert));
    }

    #[test]
    fn escalation_produces_long_message() {
        let events: Vec<_> = (0..6).map(|i| failure(Module::Inventory, i * 60)).collect();
        let report = replay(&events);

        assert_eq!(report.applied, 6);
        assert_eq!(report.health.score, 6);
        assert_eq!(report.health.status, HealthStatus::Warning);
        assert_eq!(report.alerts.len(), 1);

        let alert = &report.alerts[0];
        assert_eq!(alert.id, "realtime-inventory-issues");
        assert_eq!(alert.alert_type, ExternalAlertType::Error);
        assert_eq!(alert.priority, Severity::High);
        assert_eq!(alert.timestamp_ns, START);
        assert_eq!(
            alert.message,
            "Inventory realtime connection has failed 6 times over the last 5 minutes"
        );
    }

    #[test]
    fn recovery_clears_module() {
        let report = replay(&[
            failure(Module::Orders, 0),
            failure(Module::Orders, 10),
            ReplayEvent::Recovery {
                module: Module::Orders,
                offset_secs: 20,
            },
        ]);
        assert!(report.alerts.is_empty());
        assert_eq!(report.health.score, 10);
    }

    #[test]
    fn clear_all_resets_counts() {
        let report = replay(&[
            failure(Module::Orders, 0),
            failure(Module::Messages, 0),
            ReplayEvent::ClearAll { offset_secs: 5 },
            failure(Module::Orders, 10),
        ]);
        assert_eq!(report.alerts.len(), 1);
        let orders = report
            .modules
            .iter()
            .find(|m| m.module == Module::Orders)
            .unwrap();
        assert_eq!(orders.status.error_count, 1);
        assert_eq!(orders.status.first_occurrence_ns, Some(START + 10 * NANOS_PER_SEC));
    }

    #[test]
    fn untracked_modules_are_skipped() {
        let report = run(
            &[failure(Module::Orders, 0), failure(Module::Inventory, 0)],
            &[Module::Inventory],
            50,
            Arc::new(NoopMetrics),
            START,
        );
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.modules.len(), 1);
        assert_eq!(report.alerts[0].id, "realtime-inventory-issues");
    }

    #[test]
    fn alerts_sorted_by_id() {
        let report = replay(&[
            failure(Module::SupportTickets, 0),
            failure(Module::Conversations, 0),
            failure(Module::Messages, 0),
        ]);
        let ids: Vec<&str> = report.alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "realtime-conversations-issues",
                "realtime-messages-issues",
                "realtime-support-tickets-issues"
            ]
        );
    }

    #[test]
    fn metrics_follow_replay() {
        let metrics = Arc::new(RecordingMetrics::default());
        let events: Vec<_> = (0..3).map(|i| failure(Module::Notifications, i)).collect();
        run(&events, &Module::ALL, 50, metrics.clone(), START);
        assert_eq!(metrics.last_score(), Some(8));
        assert_eq!(metrics.last_active("medium"), Some(1));
    }

    #[test]
    fn report_serializes_flat_module_rows() {
        let report = replay(&[failure(Module::Orders, 0)]);
        let json = serde_json::to_value(&report).unwrap();
        let row = json["modules"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["module"] == "orders")
            .unwrap();
        assert_eq!(row["has_alert"], true);
        assert_eq!(row["severity"], "low");
        assert_eq!(json["health"]["status"], "healthy");
    }
}
