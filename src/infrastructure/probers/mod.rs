pub mod gateway;
pub mod ping;
pub mod system_prober;

pub use system_prober::{ProbeConfig, SystemProber};
