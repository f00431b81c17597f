use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{DiagnosisRule, Finding};

/// Gateway answers but nothing beyond it does.
pub struct RouterOnlyRule;

impl DiagnosisRule for RouterOnlyRule {
    fn name(&self) -> &'static str {
        "router_only"
    }

    fn evaluate(&self, probe: &ProbeResult, _thresholds: &DiagnosisThresholds) -> Option<Finding> {
        let applies = probe.has_internet_probe_data()
            && probe.gateway_reachable()
            && !probe.any_external_ping_ok()
            && !probe.any_dns_resolved();

        applies.then(|| {
            Finding::new(
                OverallStatus::RouterOnly,
                &["Router reachable but internet appears down"],
                &["Restart your router/modem", "Contact your ISP"],
            )
        })
    }
}
