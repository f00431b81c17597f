use serde::{Deserialize, Serialize};

/// Severity level for monitor alerts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Ok,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl Severity {
    #[must_use]
    pub const fn emoji(&self) -> &str {
        match self {
            Self::Info => "\u{2139}\u{fe0f}",
            Self::Ok => "\u{2705}",
            Self::Warning => "\u{26a0}\u{fe0f}",
            Self::Critical => "\u{1f534}",
        }
    }

    /// Bracketed console tag used by the classic line-oriented output.
    #[must_use]
    pub const fn tag(&self) -> &str {
        match self {
            Self::Info => "[INFO]",
            Self::Ok => "[OK]",
            Self::Warning => "[WARNING]",
            Self::Critical => "[FAIL]",
        }
    }
}
