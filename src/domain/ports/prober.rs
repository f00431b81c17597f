use async_trait::async_trait;

use crate::domain::entities::probe::ProbeResult;

#[async_trait]
pub trait Prober: Send + Sync {
    /// Run one round of network probes.
    ///
    /// Never fails: when nothing can be probed, implementations return
    /// [`ProbeResult::empty`] so the diagnosis engine still has input.
    /// Implementations may probe targets concurrently but must resolve to a
    /// single snapshot.
    async fn acquire(&self) -> ProbeResult;
}
