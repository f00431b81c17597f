use colored::Colorize;
use serde::Serialize;

use crate::domain::entities::probe::{DnsResult, PingResult, ProbeResult};
use crate::domain::ports::prober::Prober;
use crate::presentation::cli::formatters::report_fmt::{ok_fail, print_banner, print_connectivity};

#[derive(Serialize)]
struct PingView<'a> {
    ping_results: &'a [PingResult],
    dns_results: &'a [DnsResult],
    passed: bool,
}

/// Connectivity passes when some external host answered and, if DNS was
/// tested, some domain resolved.
#[must_use]
pub fn connectivity_passed(probe: &ProbeResult) -> bool {
    probe.any_external_ping_ok() && (probe.dns_results.is_empty() || probe.any_dns_resolved())
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run_ping(prober: &dyn Prober, json: bool) -> anyhow::Result<()> {
    if !json {
        println!("\nRunning connectivity tests...");
    }
    let probe = prober.acquire().await;
    let passed = connectivity_passed(&probe);

    if json {
        let view = PingView {
            ping_results: &probe.ping_results,
            dns_results: &probe.dns_results,
            passed,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_banner("CONNECTIVITY TEST");
    print_connectivity(&probe);

    if passed {
        println!("\n[STATUS] Connectivity tests passed {}\n", ok_fail(true));
    } else {
        println!("\n[STATUS] Connectivity tests failed {}", ok_fail(false));
        if probe.all_dns_failed() {
            println!("  - {}", "DNS is not working properly".yellow());
            println!("  - Try changing DNS server to 8.8.8.8");
        }
        println!();
    }
    Ok(())
}
