pub mod full;
pub mod monitor;
pub mod ping;
pub mod status;
