pub mod config;
pub mod devices;

pub use config::{Config, ConfigError, DeviceConfig};
