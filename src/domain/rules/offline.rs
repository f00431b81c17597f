use crate::domain::entities::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;
use crate::domain::value_objects::thresholds::DiagnosisThresholds;

use super::{DiagnosisRule, Finding};

/// Nothing external answers and the gateway is missing or silent.
pub struct OfflineRule;

pub(crate) fn applies(probe: &ProbeResult) -> bool {
    probe.has_internet_probe_data()
        && !probe.any_external_ping_ok()
        && !probe.any_dns_resolved()
        && !probe.gateway_reachable()
}

impl DiagnosisRule for OfflineRule {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn evaluate(&self, probe: &ProbeResult, _thresholds: &DiagnosisThresholds) -> Option<Finding> {
        if !applies(probe) {
            return None;
        }

        let mut reasons = vec!["No internet connectivity detected"];
        let mut advice = Vec::new();

        if probe.local_ip.is_none() {
            reasons.push("No network connection (no local IP)");
            advice.push("Check your network cable or Wi-Fi connection");
            advice.push("Restart your network adapter");
        }

        if probe.gateway.is_some() {
            reasons.push("Connected to router but no internet access");
        } else {
            reasons.push("Cannot reach default gateway");
        }

        advice.push("Check if your router has internet access");
        advice.push("Contact your ISP if router is online but no internet");

        Some(Finding::new(OverallStatus::Offline, &reasons, &advice))
    }
}
