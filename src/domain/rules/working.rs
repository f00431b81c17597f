use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{dns, latency, packet_loss, partial, DiagnosisRule, Finding};

pub struct WorkingRule;

fn degraded(probe: &ProbeResult, thresholds: &DiagnosisThresholds) -> bool {
    dns::applies(probe)
        || latency::excess_latency(probe, thresholds).is_some()
        || packet_loss::excess_loss(probe, thresholds).is_some()
        || partial::applies(probe)
}

impl DiagnosisRule for WorkingRule {
    fn name(&self) -> &'static str {
        "working"
    }

    fn evaluate(&self, probe: &ProbeResult, thresholds: &DiagnosisThresholds) -> Option<Finding> {
        let applies = probe.any_external_ping_ok()
            && probe.any_dns_resolved()
            && !degraded(probe, thresholds);

        applies.then(|| {
            Finding::new(
                OverallStatus::Working,
                &["Internet is working normally"],
                &[],
            )
        })
    }
}
