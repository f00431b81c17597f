use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{DiagnosisRule, Finding};

/// Raw connectivity works but name resolution does not.
pub struct DnsFailureRule;

pub(crate) fn applies(probe: &ProbeResult) -> bool {
    probe.any_external_ping_ok() && probe.all_dns_failed()
}

impl DiagnosisRule for DnsFailureRule {
    fn name(&self) -> &'static str {
        "dns_failure"
    }

    fn evaluate(&self, probe: &ProbeResult, _thresholds: &DiagnosisThresholds) -> Option<Finding> {
        applies(probe).then(|| {
            Finding::new(
                OverallStatus::Degraded,
                &["Internet connectivity OK but DNS resolution failing"],
                &[
                    "Check DNS server settings",
                    "Try alternate DNS (e.g., 8.8.8.8)",
                    "Flush DNS cache",
                ],
            )
        })
    }
}
