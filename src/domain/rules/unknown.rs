use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{DiagnosisRule, Finding, INSUFFICIENT_DATA};

/// Every probe was skipped or unavailable.
pub struct NoProbeDataRule;

impl DiagnosisRule for NoProbeDataRule {
    fn name(&self) -> &'static str {
        "no_probe_data"
    }

    fn evaluate(&self, probe: &ProbeResult, _thresholds: &DiagnosisThresholds) -> Option<Finding> {
        (!probe.has_probe_data()).then(|| {
            Finding::new(
                OverallStatus::Unknown,
                &[INSUFFICIENT_DATA],
                &["Check that ping and DNS resolution are available on this system"],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::probe::PingResult;
    use crate::domain::rules::test_support::probe;

    #[test]
    fn empty_probe() {
        let finding = NoProbeDataRule.evaluate(&probe(None, vec![], vec![]), &DiagnosisThresholds::default());
        assert!(finding.is_some_and(|f| f.status == OverallStatus::Unknown
            && f.reasons == vec![INSUFFICIENT_DATA]
            && f.advice == vec!["Check that ping and DNS resolution are available on this system"]));
    }

    #[test]
    fn any_ping_is_data() {
        let p = probe(None, vec![PingResult::failed("8.8.8.8")], vec![]);
        assert!(NoProbeDataRule
            .evaluate(&p, &DiagnosisThresholds::default())
            .is_none());
    }
}
