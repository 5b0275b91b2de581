pub mod csv_log;
pub mod models;
pub mod poll;
pub mod status;

pub use models::{DeviceData, DeviceType, Reading};
pub use poll::{round_succeeded, Outcome, Poller, SkipReason};
