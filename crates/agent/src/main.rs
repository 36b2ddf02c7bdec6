#![forbid(unsafe_code)]

mod cli;
mod commands;
mod replay;
mod scenario;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use infrastructure::config::AgentConfig;
use infrastructure::constants::DEFAULT_CONFIG_PATH;
use infrastructure::logging::init_logging;
use infrastructure::metrics::AgentMetrics;
use ports::secondary::metrics_port::ConfigMetrics;
use tracing::info;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = cli::parse();

    if matches!(cli.command, Command::Version) {
        commands::cmd_version();
        return Ok(());
    }

    let metrics = Arc::new(AgentMetrics::new());
    let config = load_config(&cli, &metrics)?;

    // CLI flags take precedence over config file
    let log_level = cli.log_level.unwrap_or(config.agent.log_level);
    let log_format = cli.log_format.unwrap_or(config.agent.log_format);
    init_logging(log_level, log_format)?;

    let _root_span = tracing::span!(
        tracing::Level::INFO,
        "service",
        service.name = "rthealth",
        service.version = env!("CARGO_PKG_VERSION"),
    )
    .entered();

    info!(
        log_level = log_level.as_str(),
        log_format = log_format.as_str(),
        max_history_entries = config.transport.max_history_entries,
        metrics_enabled = config.metrics.enabled,
        "rthealth starting"
    );

    match cli.command {
        Command::Version => Ok(()),
        Command::Modules => commands::cmd_modules(&config, cli.output),
        Command::Replay { scenario, metrics: print_metrics } => {
            commands::cmd_replay(&config, &metrics, &scenario, print_metrics, cli.output)
        }
    }
}

/// An explicit `--config` must exist; the default path falls back to
/// built-in defaults when absent.
fn load_config(cli: &Cli, metrics: &AgentMetrics) -> Result<AgentConfig> {
    let result = match &cli.config {
        Some(path) => AgentConfig::load(path),
        None => AgentConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH)),
    };
    metrics.record_config_load(if result.is_ok() { "success" } else { "failure" });
    Ok(result?)
}
