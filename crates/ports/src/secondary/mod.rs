pub mod metrics_port;
