#![allow(clippy::expect_used)]

use std::sync::Arc;

use chrono::Utc;
use netcheck::domain::entities::probe::{DnsResult, PingResult, ProbeResult};
use netcheck::domain::rules::{
    default_rules, diagnose, DiagnosisEngine, DiagnosisRule, Finding, INSUFFICIENT_DATA,
};
use netcheck::domain::value_objects::status::OverallStatus;
use netcheck::domain::value_objects::thresholds::DiagnosisThresholds;

fn load_fixture(name: &str) -> ProbeResult {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

fn run(probe: ProbeResult) -> netcheck::domain::entities::diagnosis::Diagnosis {
    diagnose(Arc::new(probe), &DiagnosisThresholds::default())
}

fn all_pings_at(avg: f64) -> ProbeResult {
    ProbeResult {
        timestamp: Utc::now(),
        local_ip: Some("192.168.1.20".into()),
        external_ip: None,
        gateway: Some("192.168.1.1".into()),
        ping_results: vec![
            PingResult::ok("8.8.8.8", avg),
            PingResult::ok("google.com", avg),
        ],
        dns_results: vec![DnsResult::new("google.com", true)],
    }
}

fn assert_no_duplicates(items: &[String]) {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        assert!(seen.insert(item), "duplicate entry: {item}");
    }
}

// --- Fixtures ---

#[test]
fn working_fixture() {
    let d = run(load_fixture("working.json"));
    assert_eq!(d.status, OverallStatus::Working);
    assert_eq!(d.reasons, vec!["Internet is working normally"]);
    assert!(d.advice.is_empty());
}

#[test]
fn offline_fixture_is_exactly_offline() {
    let d = run(load_fixture("offline.json"));
    assert_eq!(d.status, OverallStatus::Offline);
    assert_eq!(d.reasons[0], "No internet connectivity detected");
    assert!(d.reasons.contains(&"Cannot reach default gateway".to_string()));
    assert!(d
        .advice
        .contains(&"Check if your router has internet access".to_string()));
}

#[test]
fn router_only_fixture() {
    let d = run(load_fixture("router_only.json"));
    assert_eq!(d.status, OverallStatus::RouterOnly);
    assert_eq!(d.reasons, vec!["Router reachable but internet appears down"]);
    assert_eq!(
        d.advice,
        vec!["Restart your router/modem", "Contact your ISP"]
    );
}

#[test]
fn dns_failure_fixture() {
    let d = run(load_fixture("dns_failure.json"));
    assert_eq!(d.status, OverallStatus::Degraded);
    assert_eq!(
        d.reasons[0],
        "Internet connectivity OK but DNS resolution failing"
    );
    assert!(d.advice.contains(&"Check DNS server settings".to_string()));
    assert!(d.advice.contains(&"Flush DNS cache".to_string()));
}

#[test]
fn partial_fixture() {
    let d = run(load_fixture("partial.json"));
    assert_eq!(d.status, OverallStatus::Degraded);
    assert_eq!(d.reasons, vec!["Intermittent connectivity to some hosts"]);
    assert_eq!(d.advice, vec!["Retest; may be transient"]);
}

#[test]
fn empty_fixture_is_unknown() {
    let d = run(load_fixture("empty.json"));
    assert_eq!(d.status, OverallStatus::Unknown);
    assert_eq!(d.reasons, vec![INSUFFICIENT_DATA]);
}

// --- Properties ---

#[test]
fn totality_over_fixtures_and_edge_cases() {
    let mut inputs: Vec<ProbeResult> = [
        "working.json",
        "offline.json",
        "router_only.json",
        "dns_failure.json",
        "slow_and_lossy.json",
        "partial.json",
        "empty.json",
    ]
    .iter()
    .map(|name| load_fixture(name))
    .collect();

    inputs.push(ProbeResult::empty(Utc::now()));
    // only DNS, no pings at all
    inputs.push(ProbeResult {
        dns_results: vec![DnsResult::new("google.com", true)],
        ..ProbeResult::empty(Utc::now())
    });
    // only a gateway ping
    inputs.push(ProbeResult {
        gateway: Some("10.0.0.1".into()),
        ping_results: vec![PingResult::failed("10.0.0.1")],
        ..ProbeResult::empty(Utc::now())
    });
    // successful ping without an RTT
    inputs.push(ProbeResult {
        ping_results: vec![PingResult {
            target: "8.8.8.8".into(),
            avg_rtt_ms: None,
            success: true,
            loss_percent: None,
        }],
        dns_results: vec![DnsResult::new("google.com", true)],
        ..ProbeResult::empty(Utc::now())
    });

    for probe in inputs {
        let d = run(probe);
        assert!(!d.reasons.is_empty(), "every diagnosis explains itself");
        assert_no_duplicates(&d.reasons);
        assert_no_duplicates(&d.advice);
    }
}

#[test]
fn priority_all_failed_without_gateway_is_offline() {
    let probe = ProbeResult {
        timestamp: Utc::now(),
        local_ip: Some("192.168.1.20".into()),
        external_ip: None,
        gateway: None,
        ping_results: vec![PingResult::failed("8.8.8.8"), PingResult::failed("google.com")],
        dns_results: vec![DnsResult::new("google.com", false)],
    };
    assert_eq!(run(probe).status, OverallStatus::Offline);
}

#[test]
fn latency_boundary_is_strict() {
    let at = run(all_pings_at(150.0));
    assert_eq!(at.status, OverallStatus::Working);

    let above = run(all_pings_at(151.0));
    assert_eq!(above.status, OverallStatus::Degraded);
    assert_eq!(above.reasons[0], "High latency detected (avg 151.0ms)");
}

#[test]
fn latency_threshold_is_configurable() {
    let thresholds = DiagnosisThresholds {
        latency_ms: 50.0,
        ..DiagnosisThresholds::default()
    };
    let engine = DiagnosisEngine::new(default_rules(), thresholds);
    let d = engine.diagnose(Arc::new(all_pings_at(80.0)));
    assert_eq!(d.status, OverallStatus::Degraded);
}

#[test]
fn shared_advice_appears_once() {
    let d = run(load_fixture("slow_and_lossy.json"));
    assert_eq!(d.status, OverallStatus::Degraded);
    assert_eq!(
        d.reasons,
        vec!["High latency detected (avg 200.0ms)", "High packet loss (50%)"]
    );
    let isp = d
        .advice
        .iter()
        .filter(|a| a.as_str() == "Contact ISP if persistent")
        .count();
    assert_eq!(isp, 1);
    assert_no_duplicates(&d.advice);
}

struct SameReason(&'static str);

impl DiagnosisRule for SameReason {
    fn name(&self) -> &'static str {
        self.0
    }

    fn evaluate(&self, _probe: &ProbeResult, _t: &DiagnosisThresholds) -> Option<Finding> {
        Some(Finding::new(
            OverallStatus::Degraded,
            &["Shared cause"],
            &["Shared advice", self.0],
        ))
    }
}

#[test]
fn identical_reasons_from_two_rules_are_merged() {
    let engine = DiagnosisEngine::new(
        vec![Box::new(SameReason("first")), Box::new(SameReason("second"))],
        DiagnosisThresholds::default(),
    );
    let d = engine.diagnose(Arc::new(ProbeResult::empty(Utc::now())));
    assert_eq!(d.reasons, vec!["Shared cause"]);
    assert_eq!(d.advice, vec!["Shared advice", "first", "second"]);
}

#[test]
fn diagnosis_shares_its_probe() {
    let probe = Arc::new(load_fixture("working.json"));
    let d = DiagnosisEngine::default().diagnose(Arc::clone(&probe));
    assert!(Arc::ptr_eq(&probe, &d.derived_from));
}

#[test]
fn diagnose_does_not_mutate_input() {
    let shared = Arc::new(load_fixture("dns_failure.json"));
    let before = (*shared).clone();
    let _ = DiagnosisEngine::default().diagnose(Arc::clone(&shared));
    assert_eq!(*shared, before);
}
