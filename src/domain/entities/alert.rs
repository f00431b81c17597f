use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diagnosis::Diagnosis;
use crate::domain::value_objects::alert_kind::AlertKind;
use crate::domain::value_objects::severity::Severity;

/// Event emitted by the monitor loop on a meaningful status transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub kind: AlertKind,
    pub message: String,
    pub diagnosis: Diagnosis,
}
