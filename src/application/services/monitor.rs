use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::diagnosis::Diagnosis;
use crate::domain::entities::monitor_state::MonitorState;
use crate::domain::ports::prober::Prober;
use crate::domain::ports::reporter::Reporter;
use crate::domain::rules::DiagnosisEngine;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MonitorError {
    #[error("monitor interval must be greater than zero")]
    InvalidInterval,
}

/// Result of a single monitor tick.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub diagnosis: Diagnosis,
    pub alert: Option<Alert>,
    pub consecutive_failures: u32,
}

/// Drives the periodic cycle: acquire → diagnose → compare → alert.
///
/// One cycle runs to completion before the next is scheduled; the wait is
/// measured from the end of the previous cycle, so slow probes never overlap.
pub struct MonitorLoop<'a> {
    prober: &'a dyn Prober,
    engine: &'a DiagnosisEngine,
    reporter: &'a dyn Reporter,
    interval: Duration,
    state: MonitorState,
}

impl<'a> MonitorLoop<'a> {
    /// # Errors
    ///
    /// Returns `MonitorError::InvalidInterval` if `interval` is zero.
    pub fn new(
        prober: &'a dyn Prober,
        engine: &'a DiagnosisEngine,
        reporter: &'a dyn Reporter,
        interval: Duration,
    ) -> Result<Self, MonitorError> {
        if interval.is_zero() {
            return Err(MonitorError::InvalidInterval);
        }
        Ok(Self {
            prober,
            engine,
            reporter,
            interval,
            state: MonitorState::new(Utc::now()),
        })
    }

    #[must_use]
    pub const fn state(&self) -> &MonitorState {
        &self.state
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one cycle and hand any resulting alert to the reporter.
    ///
    /// The only suspension point is the probe acquisition; state is updated
    /// after it completes, so dropping this future mid-probe leaves the state
    /// untouched.
    pub async fn tick(&mut self) -> TickOutcome {
        let probe = self.prober.acquire().await;
        let diagnosis = self.engine.diagnose(Arc::new(probe));
        let alert = self.state.observe(diagnosis.clone());
        let consecutive_failures = self.state.consecutive_failures;

        tracing::debug!(
            status = %diagnosis.status,
            consecutive_failures,
            "Monitor tick complete"
        );

        match &alert {
            Some(alert) => {
                tracing::info!(severity = %alert.severity, kind = %alert.kind, "{}", alert.message);
                if let Err(e) = self.reporter.report_alert(alert) {
                    tracing::warn!("Alert report failed: {e}");
                }
            }
            None => {
                if let Err(e) = self.reporter.heartbeat(&diagnosis, consecutive_failures) {
                    tracing::warn!("Heartbeat report failed: {e}");
                }
            }
        }

        TickOutcome {
            diagnosis,
            alert,
            consecutive_failures,
        }
    }

    /// Tick until `shutdown` resolves, returning the number of completed ticks.
    ///
    /// Shutdown interrupts both the interval wait and an in-flight probe; the
    /// interrupted cycle emits nothing.
    pub async fn run_until<F>(&mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tracing::info!(interval = ?self.interval, "Monitor started");
        tokio::pin!(shutdown);
        let mut completed = 0u64;

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                _ = self.tick() => completed += 1,
            }

            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!(ticks = completed, "Monitor stopped");
        completed
    }
}
