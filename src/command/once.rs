use anyhow::Result;

use crate::data_mgmt::Poller;
use crate::node_mgmt::Config;

/// Run a single polling round
///
/// Device and upload failures are reported in the log only; the exit status
/// reflects configuration problems, which are caught before this is called.
pub fn once(config: &Config) -> Result<()> {
    log::info!("Fetching data from devices...");
    if Poller::new(config).poll_devices() {
        log::info!("Polling round completed");
    } else {
        log::warn!("Polling round completed with failures");
    }
    Ok(())
}
