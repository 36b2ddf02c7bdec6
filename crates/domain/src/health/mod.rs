//! Realtime connection health: per-module alert registry, severity
//! classification, system health scoring, and dashboard projections.

pub mod classifier;
pub mod engine;
pub mod entity;
pub mod error;
pub mod presenter;
pub mod scorer;
