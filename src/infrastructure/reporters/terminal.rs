use std::borrow::Cow;
use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use colored::Colorize;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::diagnosis::Diagnosis;
use crate::domain::ports::reporter::{ReportError, Reporter};
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::status::OverallStatus;

const SEPARATOR_WIDTH: usize = 60;

/// Prints alerts and diagnoses to stdout.
pub struct TerminalReporter {
    heartbeats: bool,
}

impl TerminalReporter {
    #[must_use]
    pub const fn new(heartbeats: bool) -> Self {
        Self { heartbeats }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for TerminalReporter {
    fn report_alert(&self, alert: &Alert) -> Result<(), ReportError> {
        let separator = "\u{2550}".repeat(SEPARATOR_WIDTH);

        println!("\n{}", separator.dimmed());
        println!(
            "[{}] {} {}",
            local_time(alert.timestamp),
            severity_badge(alert.severity),
            sanitize(&alert.message).bold()
        );

        if alert.diagnosis.status != OverallStatus::Working {
            print_list("Reason:", &alert.diagnosis.reasons);
            print_list("Advice:", &alert.diagnosis.advice);
        }

        println!("{}\n", separator.dimmed());
        Ok(())
    }

    fn report_diagnosis(&self, diagnosis: &Diagnosis) -> Result<(), ReportError> {
        println!(
            "\n{} {}",
            "Status:".bold(),
            status_line(diagnosis.status, diagnosis.summary())
        );
        print_list("Issues detected:", &diagnosis.reasons);
        print_list("Recommended actions:", &diagnosis.advice);
        println!();
        Ok(())
    }

    fn heartbeat(&self, diagnosis: &Diagnosis, consecutive_failures: u32) -> Result<(), ReportError> {
        if self.heartbeats {
            println!("{}", heartbeat_line(diagnosis, consecutive_failures));
        }
        Ok(())
    }
}

/// `[2024-05-01 12:00:00] [OK] Connection status: UP`
#[must_use]
pub fn heartbeat_line(diagnosis: &Diagnosis, consecutive_failures: u32) -> String {
    let status = diagnosis.status;
    let label = match status {
        OverallStatus::Working => "UP",
        OverallStatus::Degraded => "UP (degraded)",
        OverallStatus::RouterOnly | OverallStatus::Offline => "DOWN",
        OverallStatus::Unknown => "UNKNOWN",
    };
    let mut line = format!(
        "[{}] {} Connection status: {label}",
        local_time(diagnosis.derived_from.timestamp),
        status.severity().tag()
    );
    if consecutive_failures > 0 {
        let _ = write!(line, " ({consecutive_failures} consecutive failed checks)");
    }
    line
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}", title.cyan().bold());
    for item in items {
        println!("  - {}", sanitize(item));
    }
}

fn local_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[must_use]
pub fn status_line(status: OverallStatus, text: &str) -> String {
    match status {
        OverallStatus::Working => text.green().bold().to_string(),
        OverallStatus::Degraded => text.yellow().bold().to_string(),
        OverallStatus::RouterOnly | OverallStatus::Offline => text.red().bold().to_string(),
        OverallStatus::Unknown => text.dimmed().to_string(),
    }
}

/// Strip ANSI CSI sequences (`ESC [ ... final`) and C0 control characters,
/// preserving printable content, newlines, and tabs.
#[must_use]
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // parameter and intermediate bytes, then one final byte
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        if !is_stripped_control(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_stripped_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F)
}

#[must_use]
pub fn severity_badge(severity: Severity) -> String {
    let text = format!(" {} ", severity.tag());
    match severity {
        Severity::Critical => text.on_red().white().bold().to_string(),
        Severity::Warning => text.on_yellow().black().bold().to_string(),
        Severity::Ok => text.on_green().black().to_string(),
        Severity::Info => text.on_blue().white().to_string(),
    }
}
