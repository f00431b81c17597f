pub mod alert;
pub mod diagnosis;
pub mod monitor_state;
pub mod probe;

pub use alert::Alert;
pub use diagnosis::Diagnosis;
pub use monitor_state::MonitorState;
pub use probe::{DnsResult, PingResult, ProbeResult};
