use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of pinging a single target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResult {
    pub target: String,
    pub avg_rtt_ms: Option<f64>,
    pub success: bool,
    #[serde(default)]
    pub loss_percent: Option<f64>,
}

impl PingResult {
    #[must_use]
    pub fn ok(target: &str, avg_rtt_ms: f64) -> Self {
        Self {
            target: target.to_string(),
            avg_rtt_ms: Some(avg_rtt_ms),
            success: true,
            loss_percent: Some(0.0),
        }
    }

    #[must_use]
    pub fn failed(target: &str) -> Self {
        Self {
            target: target.to_string(),
            avg_rtt_ms: None,
            success: false,
            loss_percent: Some(100.0),
        }
    }
}

/// Outcome of resolving a single domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsResult {
    pub domain: String,
    pub resolved: bool,
}

impl DnsResult {
    #[must_use]
    pub fn new(domain: &str, resolved: bool) -> Self {
        Self {
            domain: domain.to_string(),
            resolved,
        }
    }
}

/// One round of network probes.
///
/// Empty `ping_results` / `dns_results` mean the probe was skipped. A ping whose
/// target equals `gateway` is the gateway reachability probe; every other ping
/// is an external target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub timestamp: DateTime<Utc>,
    pub local_ip: Option<String>,
    pub external_ip: Option<String>,
    pub gateway: Option<String>,
    #[serde(default)]
    pub ping_results: Vec<PingResult>,
    #[serde(default)]
    pub dns_results: Vec<DnsResult>,
}

impl ProbeResult {
    /// Degenerate snapshot returned when nothing could be probed.
    #[must_use]
    pub const fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            local_ip: None,
            external_ip: None,
            gateway: None,
            ping_results: Vec::new(),
            dns_results: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_probe_data(&self) -> bool {
        !self.ping_results.is_empty() || !self.dns_results.is_empty()
    }

    /// Probes that say something about the internet itself: external pings or DNS.
    #[must_use]
    pub fn has_internet_probe_data(&self) -> bool {
        self.external_ping_count() > 0 || !self.dns_results.is_empty()
    }

    fn is_gateway_target(&self, target: &str) -> bool {
        self.gateway.as_deref() == Some(target)
    }

    pub fn external_pings(&self) -> impl Iterator<Item = &PingResult> {
        self.ping_results
            .iter()
            .filter(|p| !self.is_gateway_target(&p.target))
    }

    #[must_use]
    pub fn gateway_ping(&self) -> Option<&PingResult> {
        self.ping_results
            .iter()
            .find(|p| self.is_gateway_target(&p.target))
    }

    /// Present, and if it was pinged, the ping succeeded.
    #[must_use]
    pub fn gateway_reachable(&self) -> bool {
        self.gateway.is_some() && self.gateway_ping().map_or(true, |p| p.success)
    }

    #[must_use]
    pub fn external_ping_count(&self) -> usize {
        self.external_pings().count()
    }

    #[must_use]
    pub fn successful_external_pings(&self) -> usize {
        self.external_pings().filter(|p| p.success).count()
    }

    #[must_use]
    pub fn any_external_ping_ok(&self) -> bool {
        self.successful_external_pings() > 0
    }

    /// At least one external ping ran and every one of them succeeded.
    #[must_use]
    pub fn all_external_pings_ok(&self) -> bool {
        let total = self.external_ping_count();
        total > 0 && self.successful_external_pings() == total
    }

    #[must_use]
    pub fn any_dns_resolved(&self) -> bool {
        self.dns_results.iter().any(|d| d.resolved)
    }

    /// At least one lookup ran and none resolved.
    #[must_use]
    pub fn all_dns_failed(&self) -> bool {
        !self.dns_results.is_empty() && !self.any_dns_resolved()
    }

    /// Mean RTT over successful external pings that reported one.
    /// Failed pings are excluded, not counted as zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_rtt_ms(&self) -> Option<f64> {
        let rtts: Vec<f64> = self
            .external_pings()
            .filter(|p| p.success)
            .filter_map(|p| p.avg_rtt_ms)
            .collect();
        if rtts.is_empty() {
            None
        } else {
            Some(rtts.iter().sum::<f64>() / rtts.len() as f64)
        }
    }

    /// Highest packet loss among successful external pings.
    #[must_use]
    pub fn worst_loss_percent(&self) -> Option<f64> {
        self.external_pings()
            .filter(|p| p.success)
            .filter_map(|p| p.loss_percent)
            .fold(None, |worst, loss| match worst {
                Some(w) if w >= loss => Some(w),
                _ => Some(loss),
            })
    }
}
