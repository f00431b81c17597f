pub mod dns;
pub mod latency;
pub mod offline;
pub mod packet_loss;
pub mod partial;
pub mod router_only;
pub mod unknown;
pub mod working;

use std::sync::Arc;

use crate::domain::entities::diagnosis::Diagnosis;
use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

pub const INSUFFICIENT_DATA: &str = "Insufficient data to diagnose";

/// What a single matching rule contributes to a diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub status: OverallStatus,
    pub reasons: Vec<String>,
    pub advice: Vec<String>,
}

impl Finding {
    #[must_use]
    pub fn new(status: OverallStatus, reasons: &[&str], advice: &[&str]) -> Self {
        Self {
            status,
            reasons: reasons.iter().map(|r| (*r).to_string()).collect(),
            advice: advice.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// A deterministic troubleshooting rule.
/// Rules are pure functions: probe result + thresholds in, optional finding out. No I/O.
pub trait DiagnosisRule: Send + Sync {
    /// Returns the unique name of this rule
    fn name(&self) -> &'static str;

    /// Evaluates the rule against a probe result using the given thresholds
    fn evaluate(&self, probe: &ProbeResult, thresholds: &DiagnosisThresholds) -> Option<Finding>;
}

/// Returns the default rule table in priority order
#[must_use]
pub fn default_rules() -> Vec<Box<dyn DiagnosisRule>> {
    vec![
        Box::new(offline::OfflineRule),
        Box::new(router_only::RouterOnlyRule),
        Box::new(dns::DnsFailureRule),
        Box::new(latency::HighLatencyRule),
        Box::new(packet_loss::PacketLossRule),
        Box::new(partial::PartialPingFailureRule),
        Box::new(working::WorkingRule),
        Box::new(unknown::NoProbeDataRule),
    ]
}

/// Runs an ordered rule table against probe results.
///
/// The first matching rule decides the status; reasons and advice are gathered
/// from every matching rule, in table order, without duplicates.
pub struct DiagnosisEngine {
    rules: Vec<Box<dyn DiagnosisRule>>,
    thresholds: DiagnosisThresholds,
}

impl DiagnosisEngine {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn DiagnosisRule>>, thresholds: DiagnosisThresholds) -> Self {
        Self { rules, thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &DiagnosisThresholds {
        &self.thresholds
    }

    /// Never fails: input that no rule claims yields `Unknown`.
    #[must_use]
    pub fn diagnose(&self, probe: Arc<ProbeResult>) -> Diagnosis {
        let mut status = None;
        let mut reasons: Vec<String> = Vec::new();
        let mut advice: Vec<String> = Vec::new();

        for rule in &self.rules {
            let Some(finding) = rule.evaluate(&probe, &self.thresholds) else {
                continue;
            };
            tracing::trace!(rule = rule.name(), status = %finding.status, "rule matched");
            status.get_or_insert(finding.status);
            push_unique(&mut reasons, finding.reasons);
            push_unique(&mut advice, finding.advice);
        }

        let status = status.unwrap_or_else(|| {
            push_unique(&mut reasons, vec![INSUFFICIENT_DATA.to_string()]);
            OverallStatus::Unknown
        });

        Diagnosis {
            status,
            reasons,
            advice,
            derived_from: probe,
        }
    }
}

impl Default for DiagnosisEngine {
    fn default() -> Self {
        Self::new(default_rules(), DiagnosisThresholds::default())
    }
}

/// Diagnose with the default rule table.
#[must_use]
pub fn diagnose(probe: Arc<ProbeResult>, thresholds: &DiagnosisThresholds) -> Diagnosis {
    DiagnosisEngine::new(default_rules(), thresholds.clone()).diagnose(probe)
}

fn push_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
