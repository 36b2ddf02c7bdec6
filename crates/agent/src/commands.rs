use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use application::connection_health_service_impl::now_ns;
use domain::health::entity::Module;
use infrastructure::config::AgentConfig;
use infrastructure::metrics::{AgentMetrics, DisabledMetrics};
use ports::secondary::metrics_port::MetricsPort;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::replay::{self, ReplayReport};
use crate::scenario::Scenario;

// ── Version ─────────────────────────────────────────────────────────────

pub fn cmd_version() {
    println!("rthealth {}", env!("CARGO_PKG_VERSION"));
}

// ── Modules ─────────────────────────────────────────────────────────────

pub fn cmd_modules(config: &AgentConfig, output: OutputFormat) -> Result<()> {
    let tracked = config.transport.tracked_modules()?;

    if output == OutputFormat::Json {
        let rows: Vec<_> = Module::ALL
            .iter()
            .map(|m| {
                serde_json::json!({
                    "module": m,
                    "display_name": m.display_name(),
                    "alert_id": m.alert_id(),
                    "tracked": tracked.contains(m),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<16}  {:<16}  {:<32}  {:<7}",
        "MODULE", "NAME", "ALERT ID", "TRACKED"
    );
    for module in Module::ALL {
        println!(
            "{:<16}  {:<16}  {:<32}  {:<7}",
            module.as_str(),
            module.display_name(),
            module.alert_id(),
            yes_no(tracked.contains(&module)),
        );
    }
    println!("\n{} of {} module(s) tracked.", tracked.len(), Module::ALL.len());
    Ok(())
}

// ── Replay ──────────────────────────────────────────────────────────────

pub fn cmd_replay(
    config: &AgentConfig,
    metrics: &Arc<AgentMetrics>,
    scenario_path: &Path,
    print_metrics: bool,
    output: OutputFormat,
) -> Result<()> {
    let scenario = Scenario::load(scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?;
    let events = scenario.resolve()?;
    let tracked = config.transport.tracked_modules()?;

    let port: Arc<dyn MetricsPort> = if config.metrics.enabled {
        Arc::clone(metrics) as Arc<dyn MetricsPort>
    } else {
        Arc::new(DisabledMetrics)
    };
    let report = replay::run(
        &events,
        &tracked,
        config.transport.max_history_entries,
        port,
        now_ns(),
    );

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if print_metrics {
        if config.metrics.enabled {
            print!("{}", metrics.encode()?);
        } else {
            warn!("--metrics ignored: metrics are disabled in the configuration");
        }
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    println!(
        "Health: {} ({}/10)  events applied: {}  skipped: {}",
        report.health.status, report.health.score, report.applied, report.skipped
    );

    println!();
    if report.alerts.is_empty() {
        println!("No active alerts.");
    } else {
        println!(
            "{:<32}  {:<7}  {:<8}  {}",
            "ID", "TYPE", "PRIORITY", "MESSAGE"
        );
        for alert in &report.alerts {
            println!(
                "{:<32}  {:<7}  {:<8}  {}",
                alert.id,
                alert.alert_type.as_str(),
                alert.priority.as_str(),
                alert.message
            );
        }
    }

    println!();
    println!(
        "{:<16}  {:<5}  {:<8}  {:>6}  {}",
        "MODULE", "ALERT", "SEVERITY", "ERRORS", "LAST ERROR"
    );
    for row in &report.modules {
        let severity = if row.status.has_alert {
            row.status.severity.as_str()
        } else {
            "-"
        };
        println!(
            "{:<16}  {:<5}  {:<8}  {:>6}  {}",
            row.module.as_str(),
            yes_no(row.status.has_alert),
            severity,
            row.status.error_count,
            truncate(row.status.last_error.as_deref().unwrap_or("-"), 60),
        );
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

fn yes_no(val: bool) -> &'static str {
    if val { "yes" } else { "no" }
}
