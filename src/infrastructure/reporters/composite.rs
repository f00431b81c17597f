use crate::domain::entities::alert::Alert;
use crate::domain::entities::diagnosis::Diagnosis;
use crate::domain::ports::reporter::{ReportError, Reporter};

/// Forwards reports to multiple reporters.
///
/// Returns the first error encountered (if any), but always calls all reporters.
pub struct CompositeReporter {
    reporters: Vec<Box<dyn Reporter>>,
}

impl CompositeReporter {
    #[must_use]
    pub fn new(reporters: Vec<Box<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    fn fan_out<F>(&self, what: &str, mut send: F) -> Result<(), ReportError>
    where
        F: FnMut(&dyn Reporter) -> Result<(), ReportError>,
    {
        let mut first_error = None;
        for reporter in &self.reporters {
            if let Err(e) = send(reporter.as_ref()) {
                tracing::warn!("{what} failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for CompositeReporter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Reporter for CompositeReporter {
    fn report_alert(&self, alert: &Alert) -> Result<(), ReportError> {
        self.fan_out("Alert report", |r| r.report_alert(alert))
    }

    fn report_diagnosis(&self, diagnosis: &Diagnosis) -> Result<(), ReportError> {
        self.fan_out("Diagnosis report", |r| r.report_diagnosis(diagnosis))
    }

    fn heartbeat(&self, diagnosis: &Diagnosis, consecutive_failures: u32) -> Result<(), ReportError> {
        self.fan_out("Heartbeat", |r| r.heartbeat(diagnosis, consecutive_failures))
    }
}
