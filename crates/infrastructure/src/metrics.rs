use ports::secondary::metrics_port::{ConfigMetrics, ConnectionMetrics};
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

use crate::constants::METRICS_PREFIX;

// ── Label types ─────────────────────────────────────────────────────

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct FailureLabels {
    pub module: String,
    pub severity: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ModuleLabels {
    pub module: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct SeverityLabels {
    pub severity: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ResultLabels {
    pub result: String,
}

// ── Agent metrics registry ──────────────────────────────────────────

/// Prometheus metrics registry for the agent.
///
/// All metric families use interior mutability (atomics), so recording
/// metrics only requires `&self`. The registry itself is not Clone;
/// wrap in `Arc` for multi-task sharing.
pub struct AgentMetrics {
    registry: Registry,
    pub failure_reports_total: Family<FailureLabels, Counter>,
    pub recoveries_total: Family<ModuleLabels, Counter>,
    pub active_alerts: Family<SeverityLabels, Gauge>,
    pub health_score: Gauge,
    pub config_loads_total: Family<ResultLabels, Counter>,
}

impl AgentMetrics {
    /// Create a new metrics registry with all metrics registered under
    /// the `rthealth` prefix.
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix(METRICS_PREFIX);

        let failure_reports_total = Family::<FailureLabels, Counter>::default();
        registry.register(
            "failure_reports",
            "Realtime failure reports by module and resulting severity",
            failure_reports_total.clone(),
        );

        let recoveries_total = Family::<ModuleLabels, Counter>::default();
        registry.register(
            "recoveries",
            "Module recoveries that cleared an active alert",
            recoveries_total.clone(),
        );

        let active_alerts = Family::<SeverityLabels, Gauge>::default();
        registry.register(
            "active_alerts",
            "Active realtime connection alerts by severity",
            active_alerts.clone(),
        );

        let health_score = Gauge::default();
        registry.register(
            "health_score",
            "System-wide realtime connection health score (0-10)",
            health_score.clone(),
        );
        health_score.set(10);

        let config_loads_total = Family::<ResultLabels, Counter>::default();
        registry.register(
            "config_loads",
            "Configuration load attempts by result",
            config_loads_total.clone(),
        );

        Self {
            registry,
            failure_reports_total,
            recoveries_total,
            active_alerts,
            health_score,
            config_loads_total,
        }
    }

    /// Encode all registered metrics to `OpenMetrics` text format.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        prometheus_client::encoding::text::encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}

impl Default for AgentMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionMetrics for AgentMetrics {
    fn record_failure_report(&self, module: &str, severity: &str) {
        self.failure_reports_total
            .get_or_create(&FailureLabels {
                module: module.to_string(),
                severity: severity.to_string(),
            })
            .inc();
    }

    fn record_recovery(&self, module: &str) {
        self.recoveries_total
            .get_or_create(&ModuleLabels {
                module: module.to_string(),
            })
            .inc();
    }

    fn set_active_alerts(&self, severity: &str, count: u64) {
        self.active_alerts
            .get_or_create(&SeverityLabels {
                severity: severity.to_string(),
            })
            .set(count.try_into().unwrap_or(i64::MAX));
    }

    fn set_health_score(&self, score: u64) {
        self.health_score.set(score.try_into().unwrap_or(i64::MAX));
    }
}

impl ConfigMetrics for AgentMetrics {
    fn record_config_load(&self, result: &str) {
        self.config_loads_total
            .get_or_create(&ResultLabels {
                result: result.to_string(),
            })
            .inc();
    }
}

// MetricsPort is automatically implemented via the blanket impl
// since AgentMetrics implements all sub-traits.

/// Metrics sink used when `metrics.enabled` is false: every update is
/// dropped.
pub struct DisabledMetrics;

impl ConnectionMetrics for DisabledMetrics {}
impl ConfigMetrics for DisabledMetrics {}

#[cfg(test)]
mod tests {
    use super::*;
    use ports::secondary::metrics_port::MetricsPort;

    #[test]
    fn new_creates_valid_registry() {
        let metrics = AgentMetrics::new();
        let encoded = metrics.encode().unwrap();
        // Should contain EOF marker (OpenMetrics format)
        assert!(encoded.contains("# EOF"));
    }

    #[test]
    fn health_score_starts_perfect() {
        let metrics = AgentMetrics::new();
        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("rthealth_health_score 10"));
    }

    #[test]
    fn failure_report_counter_has_labels() {
        let metrics = AgentMetrics::new();
        metrics.record_failure_report("inventory", "low");
        metrics.record_failure_report("inventory", "high");

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("rthealth_failure_reports_total"));
        assert!(encoded.contains("module=\"inventory\""));
        assert!(encoded.contains("severity=\"high\""));
    }

    #[test]
    fn active_alert_gauge_set() {
        let metrics = AgentMetrics::new();
        metrics.set_active_alerts("medium", 3);

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("rthealth_active_alerts{severity=\"medium\"} 3"));
    }

    #[test]
    fn recovery_and_config_counters() {
        let metrics = AgentMetrics::new();
        metrics.record_recovery("orders");
        metrics.record_config_load("success");

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("rthealth_recoveries_total{module=\"orders\"} 1"));
        assert!(encoded.contains("rthealth_config_loads_total{result=\"success\"} 1"));
    }

    #[test]
    fn disabled_metrics_is_a_metrics_port() {
        let port: &dyn MetricsPort = &DisabledMetrics;
        port.record_failure_report("orders", "high");
        port.set_health_score(0);
    }

    #[test]
    fn metrics_port_trait_impl() {
        let metrics = AgentMetrics::new();
        let port: &dyn MetricsPort = &metrics;
        port.record_failure_report("orders", "medium");
        port.record_recovery("orders");
        port.set_active_alerts("low", 1);
        port.set_health_score(4);
        port.record_config_load("failure");

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("rthealth_health_score 4"));
    }
}
