use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netcheck::application::config::{AppConfig, NotificationConfig, ProbeSettings};
use netcheck::domain::ports::reporter::Reporter;
use netcheck::domain::rules::{default_rules, DiagnosisEngine};
use netcheck::infrastructure::probers::{ProbeConfig, SystemProber};
use netcheck::infrastructure::reporters::{
    CompositeReporter, LogFileReporter, TerminalReporter, WebhookReporter,
};
use netcheck::presentation::cli::app::{Cli, Commands};
use netcheck::presentation::cli::commands::full::run_full;
use netcheck::presentation::cli::commands::monitor::run_monitor;
use netcheck::presentation::cli::commands::ping::run_ping;
use netcheck::presentation::cli::commands::status::run_status;

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn probe_config(settings: &ProbeSettings) -> ProbeConfig {
    ProbeConfig {
        ping_targets: settings.ping_targets.clone(),
        dns_domains: settings.dns_domains.clone(),
        ping_count: settings.ping_count,
        timeout: Duration::from_secs(settings.timeout_secs.max(1)),
        external_ip_url: Some(settings.external_ip_url.trim().to_string())
            .filter(|url| !url.is_empty()),
        ping_gateway: settings.ping_gateway,
    }
}

/// `terminal` is false where the command prints its own report.
fn build_reporter(config: &NotificationConfig, terminal: bool) -> CompositeReporter {
    let mut reporters: Vec<Box<dyn Reporter>> = Vec::new();
    if terminal && config.terminal {
        reporters.push(Box::new(TerminalReporter::default()));
    }
    if let Some(ref path) = config.log_file {
        reporters.push(Box::new(LogFileReporter::new(path)));
    }
    if let Some(ref url) = config.webhook_url {
        match WebhookReporter::new(url.clone(), config.webhook_min_severity) {
            Ok(webhook) => reporters.push(Box::new(webhook)),
            Err(e) => tracing::warn!("Webhook disabled: {e}"),
        }
    }
    CompositeReporter::new(reporters)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI: main.rs is the only place that knows concrete types
    let prober = SystemProber::new(probe_config(&config.probes));
    let engine = DiagnosisEngine::new(default_rules(), config.diagnosis_thresholds());

    match cli.command {
        Commands::Status { json } => run_status(&prober, &engine, json).await?,
        Commands::Ping { json } => run_ping(&prober, json).await?,
        Commands::Full { json } => {
            let reporter = build_reporter(&config.notifications, false);
            run_full(&prober, &engine, &reporter, json).await?;
        }
        Commands::Monitor { interval } => {
            let interval = interval.map_or_else(|| config.interval(), Duration::from_secs);
            let reporter = build_reporter(&config.notifications, true);
            run_monitor(&prober, &engine, &reporter, interval).await?;
        }
    }

    Ok(())
}
