//! Replay scenarios: a YAML list of transport events fed through the
//! failure tracker in order.
//!
//! ```yaml
//! events:
//!   - event: failure
//!     module: inventory
//!     error: "socket closed"
//!     kind: CLOSED
//!     at_secs: 0
//!   - event: recovery
//!     module: inventory
//!     at_secs: 420
//!   - event: clear_all
//! ```

use std::path::Path;

use domain::health::entity::Module;
use domain::health::error::HealthError;
use serde::Deserialize;

const DEFAULT_ERROR_KIND: &str = "CHANNEL_ERROR";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

/// One transport event. `at_secs` is the offset from the start of the
/// replay; when omitted the event happens at the previous event's time.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScenarioEvent {
    Failure {
        module: String,
        error: String,
        #[serde(default = "default_kind")]
        kind: String,
        #[serde(default)]
        at_secs: Option<u64>,
    },
    Recovery {
        module: String,
        #[serde(default)]
        at_secs: Option<u64>,
    },
    ClearAll {
        #[serde(default)]
        at_secs: Option<u64>,
    },
}

fn default_kind() -> String {
    DEFAULT_ERROR_KIND.to_string()
}

/// A scenario event with its module resolved and its time made absolute
/// relative to the replay start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEvent {
    Failure {
        module: Module,
        error: String,
        kind: String,
        offset_secs: u64,
    },
    Recovery {
        module: Module,
        offset_secs: u64,
    },
    ClearAll {
        offset_secs: u64,
    },
}

impl ReplayEvent {
    pub fn offset_secs(&self) -> u64 {
        match self {
            Self::Failure { offset_secs, .. }
            | Self::Recovery { offset_secs, .. }
            | Self::ClearAll { offset_secs } => *offset_secs,
        }
    }

    pub fn module(&self) -> Option<Module> {
        match self {
            Self::Failure { module, .. } | Self::Recovery { module, .. } => Some(*module),
            Self::ClearAll { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("event {index}: {source}")]
    Module {
        index: usize,
        #[source]
        source: HealthError,
    },

    #[error("event {index}: at_secs {at} goes back in time (previous event at {previous})")]
    TimeTravel { index: usize, at: u64, previous: u64 },
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Resolve module names and offsets. Offsets must be non-decreasing.
    pub fn resolve(&self) -> Result<Vec<ReplayEvent>, ScenarioError> {
        let mut previous = 0u64;
        let mut resolved = Vec::with_capacity(self.events.len());

        for (index, event) in self.events.iter().enumerate() {
            let at = match event {
                ScenarioEvent::Failure { at_secs, .. }
                | ScenarioEvent::Recovery { at_secs, .. }
                | ScenarioEvent::ClearAll { at_secs } => at_secs.unwrap_or(previous),
            };
            if at < previous {
                return Err(ScenarioError::TimeTravel {
                    index,
                    at,
                    previous,
                });
            }
            previous = at;

            let parse = |name: &str| {
                name.parse::<Module>()
                    .map_err(|source| ScenarioError::Module { index, source })
            };

            resolved.push(match event {
                ScenarioEvent::Failure {
                    module, error, kind, ..
                } => ReplayEvent::Failure {
                    module: parse(module.as_str())?,
                    error: error.clone(),
                    kind: kind.clone(),
                    offset_secs: at,
                },
                ScenarioEvent::Recovery { module, .. } => ReplayEvent::Recovery {
                    module: parse(module.as_str())?,
                    offset_secs: at,
                },
                ScenarioEvent::ClearAll { .. } => ReplayEvent::ClearAll { offset_secs: at },
            });
        }

        Ok(resolved)
    }
}
