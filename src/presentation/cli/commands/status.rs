use std::sync::Arc;

use colored::Colorize;
use serde::Serialize;

use crate::domain::ports::prober::Prober;
use crate::domain::rules::DiagnosisEngine;
use crate::domain::value_objects::status::OverallStatus;
use crate::presentation::cli::formatters::report_fmt::{address_line, ok_fail, print_banner};

#[derive(Serialize)]
struct StatusView<'a> {
    local_ip: Option<&'a str>,
    external_ip: Option<&'a str>,
    gateway: Option<&'a str>,
    status: OverallStatus,
    summary: &'a str,
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run_status(
    prober: &dyn Prober,
    engine: &DiagnosisEngine,
    json: bool,
) -> anyhow::Result<()> {
    if !json {
        println!("\nChecking network status...");
    }
    let probe = Arc::new(prober.acquire().await);
    let diagnosis = engine.diagnose(Arc::clone(&probe));

    if json {
        let view = StatusView {
            local_ip: probe.local_ip.as_deref(),
            external_ip: probe.external_ip.as_deref(),
            gateway: probe.gateway.as_deref(),
            status: diagnosis.status,
            summary: diagnosis.summary(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_banner("NETCHECK STATUS");
    println!();
    println!("{}", address_line("Local IP", probe.local_ip.as_deref()));
    println!("{}", address_line("External IP", probe.external_ip.as_deref()));
    if let Some(gateway) = probe.gateway.as_deref() {
        println!("[Gateway] {gateway}");
    }

    println!();
    let working = diagnosis.status == OverallStatus::Working;
    println!("[OVERALL] {} {}", diagnosis.summary(), ok_fail(working));
    if !working {
        if let Some(advice) = diagnosis.advice.first() {
            println!("\n{}", "[Quick Advice]".cyan().bold());
            println!("  - {advice}");
        }
    }
    println!("\n{}\n", "=".repeat(60).cyan());
    Ok(())
}
