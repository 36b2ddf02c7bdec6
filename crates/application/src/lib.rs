#![forbid(unsafe_code)]

pub mod connection_health_service_impl;
pub mod failure_tracker;
