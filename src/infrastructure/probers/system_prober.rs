use std::collections::HashSet;
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::task::JoinSet;

use super::gateway;
use super::ping;
use crate::domain::entities::probe::{DnsResult, ProbeResult};
use crate::domain::ports::prober::Prober;

/// Public address used to pick the outbound interface. No packet is sent.
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

/// What to probe each round.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub ping_targets: Vec<String>,
    pub dns_domains: Vec<String>,
    pub ping_count: u32,
    pub timeout: Duration,
    pub external_ip_url: Option<String>,
    pub ping_gateway: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ping_targets: vec!["8.8.8.8".into(), "google.com".into()],
            dns_domains: vec!["google.com".into()],
            ping_count: 4,
            timeout: Duration::from_secs(5),
            external_ip_url: Some("https://api.ipify.org".into()),
            ping_gateway: true,
        }
    }
}

/// Probes the host's real network stack: routing table, `ping`, the system
/// resolver and an external "what is my IP" endpoint.
pub struct SystemProber {
    config: ProbeConfig,
    client: Option<reqwest::Client>,
}

impl SystemProber {
    #[must_use]
    pub fn new(config: ProbeConfig) -> Self {
        let client = match reqwest::Client::builder().timeout(config.timeout).build() {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("HTTP client unavailable, external IP lookup disabled: {e}");
                None
            }
        };
        Self { config, client }
    }

    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    fn ping_deadline(&self) -> Duration {
        self.config
            .timeout
            .saturating_mul(self.config.ping_count.saturating_add(1))
    }

    async fn external_ip(&self) -> Option<String> {
        let client = self.client.as_ref()?;
        let url = self.config.external_ip_url.as_deref()?;

        let response = match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                tracing::debug!("External IP lookup HTTP {}", resp.status());
                return None;
            }
            Err(e) => {
                tracing::debug!("External IP lookup failed: {e}");
                return None;
            }
        };

        let body = response.text().await.ok()?;
        let ip = body.trim();
        ip.parse::<IpAddr>().is_ok().then(|| ip.to_string())
    }
}

impl Default for SystemProber {
    fn default() -> Self {
        Self::new(ProbeConfig::default())
    }
}

#[async_trait]
impl Prober for SystemProber {
    async fn acquire(&self) -> ProbeResult {
        let timestamp = Utc::now();
        let gateway = gateway::detect_gateway(self.config.timeout).await;

        let mut targets = self.config.ping_targets.clone();
        if self.config.ping_gateway {
            targets.extend(gateway.clone());
        }
        let targets = dedup_preserving_order(&targets);
        let domains = dedup_preserving_order(&self.config.dns_domains);

        let count = self.config.ping_count.max(1);
        let ping_deadline = self.ping_deadline();
        let dns_deadline = self.config.timeout;

        let (local_ip, external_ip, ping_results, dns_results) = tokio::join!(
            local_ip(),
            self.external_ip(),
            run_ordered(&targets, |target| async move {
                ping::ping(&target, count, ping_deadline).await
            }),
            run_ordered(&domains, |domain| async move {
                Some(resolve(&domain, dns_deadline).await)
            }),
        );

        tracing::debug!(
            local_ip = ?local_ip,
            gateway = ?gateway,
            pings = ping_results.len(),
            dns = dns_results.len(),
            "Probe round complete"
        );

        ProbeResult {
            timestamp,
            local_ip,
            external_ip,
            gateway,
            ping_results,
            dns_results,
        }
    }
}

/// Trim, drop blanks and keep the first occurrence of each entry.
#[must_use]
pub fn dedup_preserving_order(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .map(str::to_string)
        .collect()
}

/// Run one task per item concurrently; results come back in item order.
/// `None` results are skipped probes and are dropped.
async fn run_ordered<T, F, Fut>(items: &[String], probe: F) -> Vec<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Option<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut set = JoinSet::new();
    for (idx, item) in items.iter().enumerate() {
        let fut = probe(item.clone());
        set.spawn(async move { (idx, fut.await) });
    }

    let mut results = Vec::with_capacity(items.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, Some(value))) => results.push((idx, value)),
            Ok((_, None)) => {}
            Err(e) => tracing::warn!("Probe task failed: {e}"),
        }
    }
    results.sort_by_key(|(idx, _)| *idx);
    results.into_iter().map(|(_, value)| value).collect()
}

async fn resolve(domain: &str, deadline: Duration) -> DnsResult {
    let resolved = match tokio::time::timeout(deadline, tokio::net::lookup_host((domain, 0))).await
    {
        Ok(Ok(mut addrs)) => addrs.next().is_some(),
        Ok(Err(e)) => {
            tracing::debug!("DNS lookup for {domain} failed: {e}");
            false
        }
        Err(_) => {
            tracing::debug!("DNS lookup for {domain} timed out");
            false
        }
    };
    DnsResult::new(domain, resolved)
}

async fn local_ip() -> Option<String> {
    let socket = tokio::net::UdpSocket::bind("0.0.0.0:0").await.ok()?;
    socket.connect(ROUTE_PROBE_ADDR).await.ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_unspecified() && !ip.is_loopback()).then(|| ip.to_string())
}
