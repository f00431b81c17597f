pub mod prober;
pub mod reporter;

pub use prober::Prober;
pub use reporter::{ReportError, Reporter};
