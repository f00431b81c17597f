use chrono::{DateTime, Utc};

use super::alert::Alert;
use super::diagnosis::Diagnosis;
use crate::domain::value_objects::alert_kind::AlertKind;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::status::OverallStatus;

/// State carried from one monitor tick to the next.
///
/// Owned by exactly one monitor loop; `observe` is called once per tick.
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub last_diagnosis: Option<Diagnosis>,
    pub consecutive_failures: u32,
    pub started_at: DateTime<Utc>,
}

impl MonitorState {
    #[must_use]
    pub const fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            last_diagnosis: None,
            consecutive_failures: 0,
            started_at,
        }
    }

    #[must_use]
    pub fn last_status(&self) -> Option<OverallStatus> {
        self.last_diagnosis.as_ref().map(|d| d.status)
    }

    /// Record a new diagnosis and return the alert its transition warrants, if any.
    pub fn observe(&mut self, diagnosis: Diagnosis) -> Option<Alert> {
        let previous = self.last_status();

        if diagnosis.status == OverallStatus::Working {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        }

        let alert = transition(previous, diagnosis.status).map(|(kind, severity)| Alert {
            timestamp: diagnosis.derived_from.timestamp,
            severity,
            kind,
            message: headline(kind, &diagnosis),
            diagnosis: diagnosis.clone(),
        });

        self.last_diagnosis = Some(diagnosis);
        alert
    }
}

/// Transition table. `None` as `previous` is the synthetic start state.
#[must_use]
pub const fn transition(
    previous: Option<OverallStatus>,
    next: OverallStatus,
) -> Option<(AlertKind, Severity)> {
    use OverallStatus::{Degraded, Offline, RouterOnly, Unknown, Working};

    let Some(previous) = previous else {
        return Some((AlertKind::InitialCheck, next.severity()));
    };

    match (previous, next) {
        (Working, Working)
        | (Degraded, Degraded)
        | (Offline, Offline)
        | (RouterOnly, RouterOnly)
        | (Unknown, Unknown)
        // still down, only the failure point moved
        | (Offline, RouterOnly)
        | (RouterOnly, Offline) => None,
        (Working | Degraded | Unknown, Offline | RouterOnly) => {
            Some((AlertKind::ConnectionLost, Severity::Critical))
        }
        (Offline | RouterOnly, Working) => Some((AlertKind::ConnectionRestored, Severity::Ok)),
        (Working | Offline | RouterOnly | Unknown, Degraded) => {
            Some((AlertKind::Degraded, Severity::Warning))
        }
        (Degraded, Working) => Some((AlertKind::QualityRestored, Severity::Ok)),
        (Working | Degraded | Offline | RouterOnly, Unknown) => {
            Some((AlertKind::StatusUnknown, Severity::Warning))
        }
        (Unknown, Working) => Some((AlertKind::StatusAvailable, Severity::Ok)),
    }
}

fn headline(kind: AlertKind, diagnosis: &Diagnosis) -> String {
    match kind {
        AlertKind::InitialCheck => match diagnosis.status {
            OverallStatus::Working => "Initial check: Internet is UP".to_string(),
            OverallStatus::Degraded => format!(
                "Initial check: Internet is UP but degraded ({})",
                diagnosis.primary_reason().unwrap_or("quality issue")
            ),
            OverallStatus::RouterOnly | OverallStatus::Offline => {
                "Initial check: Internet connection LOST".to_string()
            }
            OverallStatus::Unknown => "Initial check: network status UNKNOWN".to_string(),
        },
        AlertKind::ConnectionLost => "Internet connection LOST".to_string(),
        AlertKind::ConnectionRestored => "Internet connection RESTORED".to_string(),
        AlertKind::Degraded => format!(
            "Connection DEGRADED: {}",
            diagnosis.primary_reason().unwrap_or("quality issue")
        ),
        AlertKind::QualityRestored => "Connection quality restored".to_string(),
        AlertKind::StatusUnknown => "Network status UNKNOWN: probes returned no data".to_string(),
        AlertKind::StatusAvailable => "Network status available: Internet is UP".to_string(),
    }
}
