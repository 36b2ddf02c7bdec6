use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::HealthError;
use crate::common::entity::Severity;

/// Application subsystem whose realtime subscription health is tracked.
///
/// The set is closed: every status query is total over these six values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    Notifications,
    Orders,
    Inventory,
    Messages,
    Conversations,
    SupportTickets,
}

impl Module {
    pub const ALL: [Self; 6] = [
        Self::Notifications,
        Self::Orders,
        Self::Inventory,
        Self::Messages,
        Self::Conversations,
        Self::SupportTickets,
    ];

    /// Stable slug used in alert ids and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::Orders => "orders",
            Self::Inventory => "inventory",
            Self::Messages => "messages",
            Self::Conversations => "conversations",
            Self::SupportTickets => "support-tickets",
        }
    }

    /// Human-readable name used in alert messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Notifications => "Notifications",
            Self::Orders => "Orders",
            Self::Inventory => "Inventory",
            Self::Messages => "Messages",
            Self::Conversations => "Conversations",
            Self::SupportTickets => "Support Tickets",
        }
    }

    /// Deterministic alert id: `realtime-<module>-issues`.
    pub fn alert_id(self) -> String {
        format!("realtime-{}-issues", self.as_str())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notifications" => Ok(Self::Notifications),
            "orders" => Ok(Self::Orders),
            "inventory" => Ok(Self::Inventory),
            "messages" => Ok(Self::Messages),
            "conversations" => Ok(Self::Conversations),
            "support-tickets" | "support_tickets" => Ok(Self::SupportTickets),
            _ => Err(HealthError::InvalidModule(s.to_string())),
        }
    }
}

/// One observed failure, as reported by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorHistoryEntry {
    pub timestamp_ns: u64,
    pub error: String,
    /// Transport-specific failure kind (e.g. `CHANNEL_ERROR`, `TIMED_OUT`).
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorHistoryEntry {
    pub fn new(timestamp_ns: u64, error: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            timestamp_ns,
            error: error.into(),
            kind: kind.into(),
        }
    }
}

/// Current degradation state of a single module.
///
/// `first_occurrence_ns` is fixed when the record is created; every other
/// mutable field is replaced wholesale by the next report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub module: Module,
    pub error_count: u32,
    pub last_error: String,
    pub error_history: Vec<ErrorHistoryEntry>,
    pub first_occurrence_ns: u64,
    pub severity: Severity,
}

/// Per-module status snapshot. Modules without an alert report the
/// lowest tier, a zero count, and no timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub has_alert: bool,
    pub severity: Severity,
    pub error_count: u32,
    pub last_error: Option<String>,
    pub first_occurrence_ns: Option<u64>,
}

impl ModuleStatus {
    /// The "no alert" sentinel.
    pub fn healthy() -> Self {
        Self::default()
    }
}

impl From<&AlertRecord> for ModuleStatus {
    fn from(record: &AlertRecord) -> Self {
        Self {
            has_alert: true,
            severity: record.severity,
            error_count: record.error_count,
            last_error: Some(record.last_error.clone()),
            first_occurrence_ns: Some(record.first_occurrence_ns),
        }
    }
}

/// Coarse system-wide status derived from the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Always within `0..=10`.
    pub score: u8,
}

/// Display class of an external alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalAlertType {
    Error,
    Warning,
}

impl ExternalAlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ExternalAlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable projection of an [`AlertRecord`] for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: ExternalAlertType,
    pub message: String,
    pub priority: Severity,
    /// When the degradation began, not when it was queried.
    pub timestamp_ns: u64,
}
