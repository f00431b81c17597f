use serde::{Deserialize, Serialize};

/// Numeric limits used by the diagnosis rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisThresholds {
    /// Average RTT (ms) above which the connection is considered degraded.
    /// Strictly greater than: an average equal to the threshold is fine.
    pub latency_ms: f64,
    /// Worst packet loss (%) above which the connection is considered degraded
    pub packet_loss_percent: f64,
}

impl Default for DiagnosisThresholds {
    fn default() -> Self {
        Self {
            latency_ms: 150.0,
            packet_loss_percent: 20.0,
        }
    }
}
