use std::io::Write;
use std::path::PathBuf;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::diagnosis::Diagnosis;
use crate::domain::ports::reporter::{ReportError, Reporter};

/// Appends one JSON object per line to a log file.
pub struct LogFileReporter {
    path: PathBuf,
}

impl LogFileReporter {
    /// `path` may start with `~`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    fn append_json_line(&self, value: &serde_json::Value) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReportError::SendFailed(format!("cannot create log directory: {e}"))
            })?;
        }

        let json = serde_json::to_string(value)
            .map_err(|e| ReportError::SendFailed(format!("JSON serialization failed: {e}")))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ReportError::ChannelUnavailable(format!("cannot open log file: {e}")))?;

        writeln!(file, "{json}")
            .map_err(|e| ReportError::SendFailed(format!("cannot write log file: {e}")))
    }
}

fn diagnosis_json(diagnosis: &Diagnosis) -> serde_json::Value {
    let probe = &diagnosis.derived_from;
    serde_json::json!({
        "status": diagnosis.status,
        "reasons": diagnosis.reasons,
        "advice": diagnosis.advice,
        "probe": {
            "timestamp": probe.timestamp.to_rfc3339(),
            "local_ip": probe.local_ip,
            "external_ip": probe.external_ip,
            "gateway": probe.gateway,
            "ping_results": probe.ping_results,
            "dns_results": probe.dns_results,
        },
    })
}

impl Reporter for LogFileReporter {
    fn report_alert(&self, alert: &Alert) -> Result<(), ReportError> {
        let entry = serde_json::json!({
            "type": "alert",
            "timestamp": alert.timestamp.to_rfc3339(),
            "severity": alert.severity,
            "kind": alert.kind,
            "message": alert.message,
            "diagnosis": diagnosis_json(&alert.diagnosis),
        });
        self.append_json_line(&entry)
    }

    fn report_diagnosis(&self, diagnosis: &Diagnosis) -> Result<(), ReportError> {
        let mut entry = diagnosis_json(diagnosis);
        entry["type"] = "diagnosis".into();
        entry["timestamp"] = diagnosis.derived_from.timestamp.to_rfc3339().into();
        self.append_json_line(&entry)
    }
}
