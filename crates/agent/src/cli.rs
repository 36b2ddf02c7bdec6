use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use infrastructure::config::{LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "rthealth",
    about = "Realtime connection alert registry and health scorer",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to the YAML configuration file (defaults are used when the
    /// default path does not exist)
    #[arg(short, long, env = "RTHEALTH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (takes precedence over config file)
    #[arg(short, long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log format: json (default) or text (development)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display version information
    Version,

    /// List the modules whose realtime connections are tracked
    Modules,

    /// Replay a scenario of transport events and report the resulting health
    Replay {
        /// Path to the scenario YAML file
        scenario: PathBuf,

        /// Print the OpenMetrics exposition after the run
        #[arg(long)]
        metrics: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
