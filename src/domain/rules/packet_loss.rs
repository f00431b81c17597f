use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{DiagnosisRule, Finding};

pub struct PacketLossRule;

pub(crate) fn excess_loss(probe: &ProbeResult, thresholds: &DiagnosisThresholds) -> Option<f64> {
    probe
        .worst_loss_percent()
        .filter(|loss| *loss > thresholds.packet_loss_percent)
}

impl DiagnosisRule for PacketLossRule {
    fn name(&self) -> &'static str {
        "packet_loss"
    }

    fn evaluate(&self, probe: &ProbeResult, thresholds: &DiagnosisThresholds) -> Option<Finding> {
        let loss = excess_loss(probe, thresholds)?;
        Some(Finding {
            status: OverallStatus::Degraded,
            reasons: vec![format!("High packet loss ({loss:.0}%)")],
            advice: vec![
                "Check Wi-Fi signal strength if using wireless".to_string(),
                "Check network cables if using Ethernet".to_string(),
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

    fn lossy(loss: f64) -> PingResult {
        let mut ping = PingResult::ok("8.8.8.8", 30.0);
        ping.loss_percent = Some(loss);
        ping
    }

    #[test]
    fn loss_above_threshold() {
        let p = probe(None, vec![lossy(50.0)], dns_ok());
        let finding = PacketLossRule
            .evaluate(&p, &DiagnosisThresholds::default())
            .expect("loss");
        assert_eq!(finding.reasons, vec!["High packet loss (50%)"]);
    }

    #[test]
    fn loss_at_threshold_is_tolerated() {
        let p = probe(None, vec![lossy(20.0)], dns_ok());
        assert!(PacketLossRule
            .evaluate(&p, &DiagnosisThresholds::default())
            .is_none());
    }

    #[test]
    fn failed_pings_do_not_count_as_loss() {
        let p = probe(
            None,
            vec![PingResult::ok("1.1.1.1", 20.0), PingResult::failed("8.8.8.8")],
            dns_ok(),
        );
        assert!(PacketLossRule
            .evaluate(&p, &DiagnosisThresholds::default())
            .is_none());
    }

    #[test]
    fn unknown_loss_is_ignored() {
        let mut ping = PingResult::ok("8.8.8.8", 20.0);
        ping.loss_percent = None;
        let p = probe(None, vec![ping], dns_ok());
        assert!(PacketLossRule
            .evaluate(&p, &DiagnosisThresholds::default())
            .is_none());
    }
}
