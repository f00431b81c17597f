use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{DiagnosisRule, Finding};

pub struct HighLatencyRule;

/// Average RTT when every external ping succeeded and the average is strictly above the threshold.
pub(crate) fn excess_latency(probe: &ProbeResult, thresholds: &DiagnosisThresholds) -> Option<f64> {
    if !probe.all_external_pings_ok() {
        return None;
    }
    probe
        .average_rtt_ms()
        .filter(|avg| *avg > thresholds.latency_ms)
}

impl DiagnosisRule for HighLatencyRule {
    fn name(&self) -> &'static str {
        "high_latency"
    }

    fn evaluate(&self, probe: &ProbeResult, thresholds: &DiagnosisThresholds) -> Option<Finding> {
        let avg = excess_latency(probe, thresholds)?;
        Some(Finding {
            status: OverallStatus::Degraded,
            reasons: vec![format!("High latency detected (avg {avg:.1}ms)")],
            advice: vec![
                "Check for bandwidth-heavy applications".to_string(),
                "Contact ISP if persistent".to_string(),
            ],
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::probe::PingResult;
    use crate::domain::rules::test_support::{dns_ok, probe};

    fn evaluate(rtts: &[f64]) -> Option<Finding> {
        let pings = rtts
            .iter()
            .enumerate()
            .map(|(i, rtt)| PingResult::ok(&format!("10.0.0.{}", i + 10), *rtt))
            .collect();
        HighLatencyRule.evaluate(&probe(None, pings, dns_ok()), &DiagnosisThresholds::default())
    }

    #[test]
    fn below_threshold() {
        assert!(evaluate(&[40.0, 60.0]).is_none());
    }

    #[test]
    fn exactly_at_threshold_does_not_trigger() {
        assert!(evaluate(&[150.0]).is_none());
        assert!(evaluate(&[100.0, 200.0]).is_none());
    }

    #[test]
    fn above_threshold() {
        let finding = evaluate(&[151.0]).expect("latency");
        assert_eq!(finding.status, OverallStatus::Degraded);
        assert_eq!(finding.reasons, vec!["High latency detected (avg 151.0ms)"]);
    }

    #[test]
    fn custom_threshold() {
        let p = probe(None, vec![PingResult::ok("8.8.8.8", 90.0)], dns_ok());
        let thresholds = DiagnosisThresholds {
            latency_ms: 80.0,
            ..DiagnosisThresholds::default()
        };
        assert!(HighLatencyRule.evaluate(&p, &thresholds).is_some());
    }

    #[test]
    fn skipped_when_any_ping_failed() {
        let p = probe(
            None,
            vec![PingResult::ok("8.8.8.8", 400.0), PingResult::failed("1.1.1.1")],
            dns_ok(),
        );
        assert!(HighLatencyRule
            .evaluate(&p, &DiagnosisThresholds::default())
            .is_none());
    }

    #[test]
    fn skipped_without_rtt_values() {
        let mut ping = PingResult::ok("8.8.8.8", 0.0);
        ping.avg_rtt_ms = None;
        let p = probe(None, vec![ping], dns_ok());
        assert!(HighLatencyRule
            .evaluate(&p, &DiagnosisThresholds::default())
            .is_none());
    }
}
