use std::sync::Arc;

use crate::domain::ports::prober::Prober;
use crate::domain::ports::reporter::Reporter;
use crate::domain::rules::DiagnosisEngine;
use crate::presentation::cli::formatters::report_fmt::{
    diagnosis_block, print_addresses, print_banner, print_connectivity, print_section_header,
};

/// Probe, diagnose and print the complete report. The diagnosis is also
/// handed to `reporter` for the file and webhook channels; it should not
/// include a terminal reporter.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run_full(
    prober: &dyn Prober,
    engine: &DiagnosisEngine,
    reporter: &dyn Reporter,
    json: bool,
) -> anyhow::Result<()> {
    if !json {
        println!("\nRunning full diagnostic...");
    }
    let probe = Arc::new(prober.acquire().await);
    let diagnosis = engine.diagnose(probe);

    if json {
        println!("{}", serde_json::to_string_pretty(&diagnosis)?);
    } else {
        print_banner("NETCHECK REPORT");
        print_section_header("Network Status");
        print_addresses(&diagnosis.derived_from);
        print_section_header("Connectivity Test");
        print_connectivity(&diagnosis.derived_from);
        print_section_header("Diagnosis");
        print!("{}", diagnosis_block(&diagnosis));
        println!();
    }

    if let Err(e) = reporter.report_diagnosis(&diagnosis) {
        tracing::warn!("Diagnosis report failed: {e}");
    }
    Ok(())
}
