use std::fmt::Write;

use colored::Colorize;

use crate::domain::entities::diagnosis::Diagnosis;
use crate::domain::entities::probe::{DnsResult, PingResult, ProbeResult};
use crate::domain::value_objects::status::OverallStatus;

const RULE_WIDTH: usize = 60;

pub fn print_banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule.cyan());
    println!("{:^width$}", title.bold(), width = RULE_WIDTH);
    println!("{}", rule.cyan());
}

pub fn print_section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}

#[must_use]
pub fn ok_fail(success: bool) -> String {
    if success {
        "[OK]".green().to_string()
    } else {
        "[FAIL]".red().bold().to_string()
    }
}

/// `[Local IP] 192.168.1.20`, or `[Local IP] Not detected [FAIL]`.
#[must_use]
pub fn address_line(label: &str, value: Option<&str>) -> String {
    value.map_or_else(
        || format!("[{label}] Not detected {}", ok_fail(false)),
        |v| format!("[{label}] {v}"),
    )
}

/// `[PING] 8.8.8.8: avg=12.3ms, loss=25% [OK]`
#[must_use]
pub fn ping_line(ping: &PingResult, gateway: Option<&str>) -> String {
    let label = if gateway == Some(ping.target.as_str()) {
        format!("{} (gateway)", ping.target)
    } else {
        ping.target.clone()
    };

    if !ping.success {
        return format!("[PING] {label}: failed {}", ok_fail(false));
    }

    let mut detail = ping
        .avg_rtt_ms
        .map_or_else(|| "success".to_string(), |avg| format!("avg={avg:.1}ms"));
    if let Some(loss) = ping.loss_percent.filter(|l| *l > 0.0) {
        detail.push_str(&format!(", loss={loss:.0}%"));
    }
    format!("[PING] {label}: {detail} {}", ok_fail(true))
}

/// `[DNS] google.com: working [OK]`
#[must_use]
pub fn dns_line(dns: &DnsResult) -> String {
    let text = if dns.resolved { "working" } else { "not responding" };
    format!("[DNS] {}: {text} {}", dns.domain, ok_fail(dns.resolved))
}

pub fn print_addresses(probe: &ProbeResult) {
    println!("{}", address_line("Local IP", probe.local_ip.as_deref()));
    println!("{}", address_line("External IP", probe.external_ip.as_deref()));
    println!("{}", address_line("Gateway", probe.gateway.as_deref()));
}

pub fn print_connectivity(probe: &ProbeResult) {
    if probe.ping_results.is_empty() && probe.dns_results.is_empty() {
        println!("{}", "No connectivity tests were run".dimmed());
        return;
    }
    for ping in &probe.ping_results {
        println!("{}", ping_line(ping, probe.gateway.as_deref()));
    }
    for dns in &probe.dns_results {
        println!("{}", dns_line(dns));
    }
}

/// Status line followed by the issue and action lists.
#[must_use]
pub fn diagnosis_block(diagnosis: &Diagnosis) -> String {
    let summary = diagnosis.summary();
    let status = match diagnosis.status {
        OverallStatus::Working => summary.green().bold(),
        OverallStatus::Degraded => summary.yellow().bold(),
        OverallStatus::RouterOnly | OverallStatus::Offline => summary.red().bold(),
        OverallStatus::Unknown => summary.dimmed(),
    };

    let mut out = format!("{} {status}\n", "Status:".bold());
    for (title, items) in [
        ("Issues detected:", &diagnosis.reasons),
        ("Recommended actions:", &diagnosis.advice),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = write!(out, "\n{}\n", title.cyan().bold());
        for item in items {
            let _ = writeln!(out, "  - {item}");
        }
    }
    out
}
