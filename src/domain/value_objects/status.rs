use serde::{Deserialize, Serialize};

use super::severity::Severity;

/// Overall verdict produced by the diagnosis engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OverallStatus {
    Working,
    Degraded,
    RouterOnly,
    Offline,
    Unknown,
}

impl OverallStatus {
    /// `true` while the internet is reachable, even if quality is poor.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Working | Self::Degraded)
    }

    /// `true` when the internet is not reachable at all.
    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Offline | Self::RouterOnly)
    }

    /// Severity used when this status is first observed.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Working => Severity::Ok,
            Self::Degraded => Severity::Warning,
            Self::RouterOnly | Self::Offline => Severity::Critical,
            Self::Unknown => Severity::Info,
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Working => write!(f, "WORKING"),
            Self::Degraded => write!(f, "DEGRADED"),
            Self::RouterOnly => write!(f, "ROUTER ONLY"),
            Self::Offline => write!(f, "OFFLINE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
