use std::thread;

use anyhow::Result;
use chrono::Utc;

use crate::data_mgmt::Poller;
use crate::helpers::until_next_slot;
use crate::node_mgmt::Config;

/// Poll now, then every `polling_interval` minutes on the cron grid
///
/// Rounds run back to back on this thread and never overlap. A failing
/// round is logged and the schedule carries on.
pub fn start(config: &Config) -> Result<()> {
    log::info!(
        "Starting energy monitor with schedule: */{} * * * * ({})",
        config.polling_interval,
        config.timezone
    );
    let poller = Poller::new(config);

    run_round(&poller);
    loop {
        let wait = until_next_slot(Utc::now(), config.polling_interval, config.timezone);
        log::debug!("Next polling round in {:.1}s", wait.as_secs_f32());
        thread::sleep(wait);
        run_round(&poller);
    }
}

fn run_round(poller: &Poller) {
    log::info!("Polling all devices...");
    if !poller.poll_devices() {
        log::warn!("Polling round completed with failures");
    }
}
