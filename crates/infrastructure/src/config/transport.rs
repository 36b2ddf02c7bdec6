//! Transport-side settings: history bound and tracked module allow-list.

use domain::health::entity::Module;
use serde::{Deserialize, Serialize};

use super::common::{ConfigError, MAX_HISTORY_ENTRIES, check_range, parse_module};
use crate::constants::DEFAULT_MAX_HISTORY_ENTRIES;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Per-module error history kept before oldest entries are dropped.
    #[serde(default = "default_max_history_entries")]
    pub max_history_entries: usize,

    /// Modules whose failures are forwarded. Empty means all of them.
    #[serde(default)]
    pub modules: Vec<String>,
}

fn default_max_history_entries() -> usize {
    DEFAULT_MAX_HISTORY_ENTRIES
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_history_entries: default_max_history_entries(),
            modules: Vec::new(),
        }
    }
}

impl TransportConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "transport.max_history_entries",
            self.max_history_entries,
            MAX_HISTORY_ENTRIES,
        )?;

        let mut seen = Vec::with_capacity(self.modules.len());
        for (idx, name) in self.modules.iter().enumerate() {
            let field = format!("transport.modules[{idx}]");
            let module = parse_module(&field, name)?;
            if seen.contains(&module) {
                return Err(ConfigError::Validation {
                    field,
                    message: format!("duplicate module '{module}'"),
                });
            }
            seen.push(module);
        }
        Ok(())
    }

    /// Resolve the allow-list to domain modules; empty means every module.
    pub fn tracked_modules(&self) -> Result<Vec<Module>, ConfigError> {
        if self.modules.is_empty() {
            return Ok(Module::ALL.to_vec());
        }
        self.modules
            .iter()
            .enumerate()
            .map(|(idx, name)| parse_module(&format!("transport.modules[{idx}]"), name))
            .collect()
    }
}
