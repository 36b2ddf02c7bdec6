// ── Paths ─────────────────────────────────────────────────────────

pub const DEFAULT_CONFIG_PATH: &str = "/etc/rthealth/config.yaml";

// ── Transport defaults ─────────────────────────────────────────────

/// Per-module error history kept by the transport side before the oldest
/// entries are dropped.
pub const DEFAULT_MAX_HISTORY_ENTRIES: usize = 50;

// ── Metrics ───────────────────────────────────────────────────────

pub const METRICS_PREFIX: &str = "rthealth";
