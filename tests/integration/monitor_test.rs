#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use netcheck::application::services::monitor::{MonitorError, MonitorLoop};
use netcheck::domain::entities::alert::Alert;
use netcheck::domain::entities::diagnosis::Diagnosis;
use netcheck::domain::entities::monitor_state::MonitorState;
use netcheck::domain::entities::probe::ProbeResult;
use netcheck::domain::ports::prober::Prober;
use netcheck::domain::ports::reporter::{ReportError, Reporter};
use netcheck::domain::rules::DiagnosisEngine;
use netcheck::domain::value_objects::alert_kind::AlertKind;
use netcheck::domain::value_objects::severity::Severity;
use netcheck::domain::value_objects::status::OverallStatus;

fn load_fixture(name: &str) -> ProbeResult {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

/// Plays back fixtures in order; an exhausted script yields an empty probe.
struct FixtureProber {
    script: Mutex<VecDeque<ProbeResult>>,
}

impl FixtureProber {
    fn new(names: &[&str]) -> Self {
        Self {
            script: Mutex::new(names.iter().map(|n| load_fixture(n)).collect()),
        }
    }
}

#[async_trait]
impl Prober for FixtureProber {
    async fn acquire(&self) -> ProbeResult {
        self.script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| ProbeResult::empty(Utc::now()))
    }
}

#[derive(Default)]
struct RecordingReporter {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingReporter {
    fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().expect("lock").clone()
    }
}

impl Reporter for RecordingReporter {
    fn report_alert(&self, alert: &Alert) -> Result<(), ReportError> {
        self.alerts.lock().expect("lock").push(alert.clone());
        Ok(())
    }

    fn report_diagnosis(&self, _diagnosis: &Diagnosis) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Feed fixtures through a fresh monitor, returning every alert and the
/// failure counter after each tick.
async fn drive(names: &[&str]) -> (Vec<Alert>, Vec<u32>) {
    let prober = FixtureProber::new(names);
    let engine = DiagnosisEngine::default();
    let reporter = RecordingReporter::default();
    let mut monitor = MonitorLoop::new(&prober, &engine, &reporter, Duration::from_secs(10))
        .expect("valid interval");

    let mut failures = Vec::new();
    for _ in names {
        failures.push(monitor.tick().await.consecutive_failures);
    }
    (reporter.alerts(), failures)
}

#[tokio::test]
async fn identical_working_ticks_alert_once() {
    let (alerts, failures) = drive(&["working.json", "working.json"]).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::InitialCheck);
    assert_eq!(alerts[0].severity, Severity::Ok);
    assert_eq!(alerts[0].message, "Initial check: Internet is UP");
    assert_eq!(failures, vec![0, 0]);
}

#[tokio::test]
async fn restoration_after_outage() {
    let (alerts, failures) = drive(&["offline.json", "offline.json", "working.json"]).await;

    let severities: Vec<Severity> = alerts.iter().map(|a| a.severity).collect();
    assert_eq!(severities, vec![Severity::Critical, Severity::Ok]);
    assert!(alerts[0].message.contains("LOST"), "{}", alerts[0].message);
    assert_eq!(alerts[0].kind, AlertKind::InitialCheck);
    assert!(alerts[1].message.contains("RESTORED"));
    assert_eq!(alerts[1].kind, AlertKind::ConnectionRestored);
    assert_eq!(failures, vec![1, 2, 0]);
}

#[tokio::test]
async fn loss_and_restoration_from_working() {
    let (alerts, _) = drive(&["working.json", "offline.json", "working.json"]).await;

    let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AlertKind::InitialCheck,
            AlertKind::ConnectionLost,
            AlertKind::ConnectionRestored
        ]
    );
    let lost = &alerts[1];
    assert_eq!(lost.severity, Severity::Critical);
    assert_eq!(lost.message, "Internet connection LOST");
    assert!(!lost.diagnosis.reasons.is_empty());
    assert!(!lost.diagnosis.advice.is_empty());
}

#[tokio::test]
async fn degraded_round_trip() {
    let (alerts, failures) = drive(&["working.json", "dns_failure.json", "working.json"]).await;

    let transitions: Vec<(AlertKind, Severity)> = alerts
        .iter()
        .filter(|a| a.kind != AlertKind::InitialCheck)
        .map(|a| (a.kind, a.severity))
        .collect();
    assert_eq!(
        transitions,
        vec![
            (AlertKind::Degraded, Severity::Warning),
            (AlertKind::QualityRestored, Severity::Ok)
        ]
    );
    assert!(alerts[1].message.contains("DNS resolution failing"));
    assert_eq!(failures, vec![0, 1, 0]);
}

#[tokio::test]
async fn router_only_after_offline_stays_silent() {
    let (alerts, failures) = drive(&["offline.json", "router_only.json"]).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(failures, vec![1, 2]);
}

#[tokio::test]
async fn probe_outage_becomes_unknown() {
    // script runs dry after the first tick
    let prober = FixtureProber::new(&["working.json"]);
    let engine = DiagnosisEngine::default();
    let reporter = RecordingReporter::default();
    let mut monitor = MonitorLoop::new(&prober, &engine, &reporter, Duration::from_secs(1))
        .expect("valid interval");

    monitor.tick().await;
    let outcome = monitor.tick().await;

    assert_eq!(outcome.diagnosis.status, OverallStatus::Unknown);
    let alert = outcome.alert.expect("status unknown alert");
    assert_eq!(alert.kind, AlertKind::StatusUnknown);
    assert_eq!(monitor.state().consecutive_failures, 1);
}

#[test]
fn zero_interval_never_starts() {
    let prober = FixtureProber::new(&[]);
    let engine = DiagnosisEngine::default();
    let reporter = RecordingReporter::default();
    let result = MonitorLoop::new(&prober, &engine, &reporter, Duration::ZERO);
    assert!(matches!(result, Err(MonitorError::InvalidInterval)));
}

#[tokio::test(start_paused = true)]
async fn cancellation_ends_loop_without_final_alert() {
    let prober = FixtureProber::new(&["working.json", "working.json", "offline.json"]);
    let engine = DiagnosisEngine::default();
    let reporter = RecordingReporter::default();
    let mut monitor = MonitorLoop::new(&prober, &engine, &reporter, Duration::from_secs(10))
        .expect("valid interval");

    // ticks at 0s and 10s; shutdown lands during the wait before the third
    let ticks = monitor
        .run_until(tokio::time::sleep(Duration::from_secs(15)))
        .await;

    assert_eq!(ticks, 2);
    let alerts = reporter.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::InitialCheck);
    assert_eq!(
        monitor.state().last_status(),
        Some(OverallStatus::Working)
    );
}

#[test]
fn state_machine_without_a_loop() {
    let engine = DiagnosisEngine::default();
    let mut state = MonitorState::new(Utc::now());

    let kinds: Vec<Option<AlertKind>> = ["working.json", "router_only.json", "router_only.json"]
        .iter()
        .map(|name| {
            let diagnosis = engine.diagnose(Arc::new(load_fixture(name)));
            state.observe(diagnosis).map(|a| a.kind)
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            Some(AlertKind::InitialCheck),
            Some(AlertKind::ConnectionLost),
            None
        ]
    );
    assert_eq!(state.consecutive_failures, 2);
}
