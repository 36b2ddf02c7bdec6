// Focused sub-traits for recording Prometheus metrics, grouped by concern.
//
// All methods take `&self` because the underlying implementation uses
// atomic operations (interior mutability via `prometheus-client`).
//
// Default implementations are no-ops, allowing test mocks to implement
// only the sub-traits relevant to the service under test.

// ── Connection health metrics ──────────────────────────────────────

pub trait ConnectionMetrics: Send + Sync {
    /// Record a failure report for a module at its resulting severity.
    fn record_failure_report(&self, _module: &str, _severity: &str) {}

    /// Record a module recovery that cleared an active alert.
    fn record_recovery(&self, _module: &str) {}

    /// Set the number of active alerts at a given severity.
    fn set_active_alerts(&self, _severity: &str, _count: u64) {}

    /// Set the current system health score (0–10).
    fn set_health_score(&self, _score: u64) {}
}

// ── Configuration metrics ──────────────────────────────────────────

pub trait ConfigMetrics: Send + Sync {
    /// Record a configuration load attempt (success or failure).
    fn record_config_load(&self, _result: &str) {}
}

// ── Composite super-trait ──────────────────────────────────────────

/// Unified metrics port composing all sub-traits.
///
/// Services accept `Arc<dyn MetricsPort>` for full access.
pub trait MetricsPort: ConnectionMetrics + ConfigMetrics {}

/// Blanket implementation: any type implementing all sub-traits automatically
/// implements `MetricsPort`.
impl<T> MetricsPort for T where T: ConnectionMetrics + ConfigMetrics {}
