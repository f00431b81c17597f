use std::time::Duration;

use crate::domain::entities::probe::PingResult;

/// Parsed summary of one `ping` run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PingStats {
    pub avg_rtt_ms: Option<f64>,
    pub loss_percent: Option<f64>,
}

const fn count_flag() -> &'static str {
    if cfg!(windows) {
        "-n"
    } else {
        "-c"
    }
}

/// Ping `target` with the OS binary.
///
/// Returns `None` when no `ping` binary is available, so the caller can skip
/// the probe instead of reporting a false failure.
pub async fn ping(target: &str, count: u32, deadline: Duration) -> Option<PingResult> {
    let run = tokio::process::Command::new("ping")
        .args([count_flag(), &count.to_string(), target])
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(deadline, run).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("ping binary not found, skipping {target}");
            return None;
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to run ping for {target}: {e}");
            return Some(PingResult::failed(target));
        }
        Err(_) => {
            tracing::debug!("ping {target} timed out after {deadline:?}");
            return Some(PingResult::failed(target));
        }
    };

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    let stats = parse_ping_output(&text);

    let success = output.status.success() && stats.loss_percent.is_none_or(|l| l < 100.0);
    Some(PingResult {
        target: target.to_string(),
        avg_rtt_ms: if success { stats.avg_rtt_ms } else { None },
        success,
        loss_percent: stats.loss_percent.or(if success { None } else { Some(100.0) }),
    })
}

#[must_use]
pub fn parse_ping_output(output: &str) -> PingStats {
    PingStats {
        avg_rtt_ms: parse_avg_rtt(output),
        loss_percent: parse_loss(output),
    }
}

/// Linux `rtt min/avg/max/mdev = a/b/c/d ms`, BSD `round-trip min/avg/max/stddev = a/b/c/d ms`,
/// Windows `Average = 12ms`.
fn parse_avg_rtt(output: &str) -> Option<f64> {
    for line in output.lines() {
        let line = line.trim();
        if line.starts_with("rtt") || line.starts_with("round-trip") {
            let (_, values) = line.split_once('=')?;
            return values.trim().split('/').nth(1)?.trim().parse().ok();
        }
        if let Some(idx) = line.find("Average = ") {
            let rest = &line[idx + "Average = ".len()..];
            let digits: String = rest
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            return digits.parse().ok();
        }
    }
    None
}

/// `25% packet loss` (Linux, BSD) or `(25% loss)` (Windows).
fn parse_loss(output: &str) -> Option<f64> {
    output.match_indices('%').find_map(|(idx, _)| {
        let after = output[idx + 1..].trim_start();
        if !(after.starts_with("packet loss") || after.starts_with("loss")) {
            return None;
        }
        output[..idx]
            .rsplit(|c: char| !(c.is_ascii_digit() || c == '.'))
            .next()
            .and_then(|n| n.parse().ok())
    })
}
