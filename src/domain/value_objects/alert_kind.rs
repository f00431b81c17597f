use serde::{Deserialize, Serialize};

/// Which status transition produced an alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// First tick of a monitor run.
    InitialCheck,
    ConnectionLost,
    ConnectionRestored,
    Degraded,
    /// `Degraded` back to `Working`.
    QualityRestored,
    StatusUnknown,
    /// `Unknown` back to `Working`.
    StatusAvailable,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::InitialCheck => "initial_check",
            Self::ConnectionLost => "connection_lost",
            Self::ConnectionRestored => "connection_restored",
            Self::Degraded => "degraded",
            Self::QualityRestored => "quality_restored",
            Self::StatusUnknown => "status_unknown",
            Self::StatusAvailable => "status_available",
        };
        f.write_str(label)
    }
}
