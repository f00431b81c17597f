pub mod composite;
pub mod log_file;
pub mod terminal;
pub mod webhook;

pub use composite::CompositeReporter;
pub use log_file::LogFileReporter;
pub use terminal::TerminalReporter;
pub use webhook::WebhookReporter;
