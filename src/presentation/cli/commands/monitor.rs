use std::future::Future;
use std::time::Duration;

use colored::Colorize;

use crate::application::services::monitor::MonitorLoop;
use crate::domain::ports::prober::Prober;
use crate::domain::ports::reporter::Reporter;
use crate::domain::rules::DiagnosisEngine;

/// Run the monitor loop until Ctrl+C.
///
/// SIGTERM is not handled; only SIGINT via [`tokio::signal::ctrl_c()`].
///
/// # Errors
///
/// Returns an error if the interval is zero.
pub async fn run_monitor(
    prober: &dyn Prober,
    engine: &DiagnosisEngine,
    reporter: &dyn Reporter,
    interval: Duration,
) -> anyhow::Result<()> {
    run_monitor_until(prober, engine, reporter, interval, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// # Errors
///
/// Returns an error if the interval is zero.
pub async fn run_monitor_until<F>(
    prober: &dyn Prober,
    engine: &DiagnosisEngine,
    reporter: &dyn Reporter,
    interval: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let mut monitor = MonitorLoop::new(prober, engine, reporter, interval)?;

    println!(
        "{}",
        format!(
            "Starting network monitor (checking every {} seconds)",
            interval.as_secs()
        )
        .bold()
    );
    println!("Press Ctrl+C to stop\n");

    let ticks = monitor.run_until(shutdown).await;

    println!("\n\nMonitoring stopped by user");
    tracing::debug!(ticks, "Monitor exited");
    Ok(())
}
