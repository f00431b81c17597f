pub mod alert_kind;
pub mod severity;
pub mod status;
pub mod thresholds;

pub use alert_kind::AlertKind;
pub use severity::Severity;
pub use status::OverallStatus;
pub use thresholds::DiagnosisThresholds;
