use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::probe::ProbeResult;
use crate::domain::value_objects::status::OverallStatus;

/// Verdict derived from one [`ProbeResult`].
///
/// `reasons` are ranked most likely cause first, `advice` follows the same
/// priority. Neither list contains the same string twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub status: OverallStatus,
    pub reasons: Vec<String>,
    pub advice: Vec<String>,
    pub derived_from: Arc<ProbeResult>,
}

impl Diagnosis {
    /// One-line verdict for the quick status output.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        match self.status {
            OverallStatus::Working => "Internet is working normally [OK]",
            OverallStatus::Degraded => "Connected but connection quality is degraded [WARNING]",
            OverallStatus::RouterOnly => "Router reachable but no internet [FAIL]",
            OverallStatus::Offline => "No internet connection [FAIL]",
            OverallStatus::Unknown => "Unknown status - not enough probe data",
        }
    }

    #[must_use]
    pub fn primary_reason(&self) -> Option<&str> {
        self.reasons.first().map(String::as_str)
    }
}
