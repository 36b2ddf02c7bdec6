use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("invalid module: {0}")]
    InvalidModule(String),
}
