//! Shared parsing helpers and error types used across all config modules.

use domain::health::entity::Module;

// ── Security limits ────────────────────────────────────────────────

/// Upper bound on the per-module error history kept by the transport side.
pub(super) const MAX_HISTORY_ENTRIES: usize = 10_000;

// ── Config errors ──────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("invalid value '{value}' for field '{field}': expected one of {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e.to_string())
    }
}

// ── Shared serde defaults ──────────────────────────────────────────

pub(super) fn default_true() -> bool {
    true
}

// ── Parsing helpers ────────────────────────────────────────────────

/// Parse a module slug, reporting the offending field on failure.
pub fn parse_module(field: &str, s: &str) -> Result<Module, ConfigError> {
    s.parse::<Module>().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: s.to_string(),
        expected: Module::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Enforce an inclusive `1..=max` range on a numeric setting.
pub(super) fn check_range(field: &str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        return Err(ConfigError::Validation {
            field: field.to_string(),
            message: format!("value {value} must be between 1 and {max}"),
        });
    }
    Ok(())
}
