use thiserror::Error;

use crate::health::error::HealthError;

/// Workspace-wide error; each bounded context converts into it.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<HealthError> for DomainError {
    fn from(err: HealthError) -> Self {
        match err {
            HealthError::InvalidModule(_) => Self::InvalidInput(err.to_string()),
        }
    }
}
