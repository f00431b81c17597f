use thiserror::Error;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::diagnosis::Diagnosis;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to deliver report: {0}")]
    SendFailed(String),
    #[error("report channel unavailable: {0}")]
    ChannelUnavailable(String),
}

pub trait Reporter: Send + Sync {
    /// Deliver a monitor alert.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the report fails to send
    /// or the channel is unavailable.
    fn report_alert(&self, alert: &Alert) -> Result<(), ReportError>;

    /// Deliver a one-shot diagnosis.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the report fails to send
    /// or the channel is unavailable.
    fn report_diagnosis(&self, diagnosis: &Diagnosis) -> Result<(), ReportError>;

    /// Called on monitor ticks that produced no alert.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the heartbeat cannot be written.
    fn heartbeat(
        &self,
        _diagnosis: &Diagnosis,
        _consecutive_failures: u32,
    ) -> Result<(), ReportError> {
        Ok(())
    }
}
