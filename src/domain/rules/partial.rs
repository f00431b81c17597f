use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{DiagnosisRule, Finding};

/// Some, but not all, external targets answer while DNS works.
pub struct PartialPingFailureRule;

pub(crate) fn applies(probe: &ProbeResult) -> bool {
    let ok = probe.successful_external_pings();
    ok > 0 && ok < probe.external_ping_count() && probe.any_dns_resolved()
}

impl DiagnosisRule for PartialPingFailureRule {
    fn name(&self) -> &'static str {
        "partial_ping_failure"
    }

    fn evaluate(&self, probe: &ProbeResult, _thresholds: &DiagnosisThresholds) -> Option<Finding> {
        applies(probe).then(|| {
            Finding::new(
                OverallStatus::Degraded,
                &["Intermittent connectivity to some hosts"],
                &["Retest; may be transient"],
            )
        })
    }
}
