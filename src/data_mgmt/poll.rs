//! Polling round: fetch every device, log to CSV, upload to PVOutput
//!
//! Devices are handled concurrently, one scoped thread each, and the round
//! ends once every device pipeline has settled. Within a device the steps
//! are strictly sequential.
use std::thread;

use chrono::{DateTime, Utc};

use crate::interfaces::{HomeWizardClient, PvOutputClient};
use crate::node_mgmt::config::{Config, DeviceConfig};

use super::{csv_log, status};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    FetchFailed,
}

/// Result of one device's pipeline within a round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Contributes nothing to the round result
    Skipped(SkipReason),
    Failed,
    Succeeded,
}

/// A round succeeds unless some device failed; skipped devices don't count
pub fn round_succeeded(outcomes: &[Outcome]) -> bool {
    !outcomes.contains(&Outcome::Failed)
}

pub struct Poller<'a> {
    config: &'a Config,
    homewizard: HomeWizardClient,
    pvoutput: PvOutputClient,
}

impl<'a> Poller<'a> {
    pub fn new(config: &'a Config) -> Self {
        Poller {
            config,
            homewizard: HomeWizardClient::new(),
            pvoutput: PvOutputClient::new(&config.pvoutput.url),
        }
    }

    pub fn poll_devices(&self) -> bool {
        self.poll_devices_at(Utc::now())
    }

    /// Run one round; all devices share `timestamp`
    pub fn poll_devices_at(&self, timestamp: DateTime<Utc>) -> bool {
        if let Err(e) = csv_log::ensure_output_folder(&self.config.output_folder) {
            log::error!(
                "Output folder {:?} is not usable: {}",
                self.config.output_folder,
                e
            );
            return false;
        }

        let Some(api_key) = self.config.pvoutput.api_key.as_deref().filter(|k| !k.is_empty())
        else {
            log::error!("PVOutput is not configured; missing API key");
            return false;
        };

        log::info!(
            "Polling {} of {} devices",
            self.config.enabled_devices().count(),
            self.config.devices.len()
        );
        let outcomes = self.run_pipelines(api_key, timestamp);
        let success = round_succeeded(&outcomes);

        let count = |wanted: fn(&Outcome) -> bool| outcomes.iter().filter(|o| wanted(o)).count();
        log::info!(
            "Polling round finished: {} succeeded, {} failed, {} skipped",
            count(|o| *o == Outcome::Succeeded),
            count(|o| *o == Outcome::Failed),
            count(|o| matches!(o, Outcome::Skipped(_))),
        );
        if !success {
            log::error!("One or more devices failed to send data to PVOutput");
        }
        success
    }

    fn run_pipelines(&self, api_key: &str, timestamp: DateTime<Utc>) -> Vec<Outcome> {
        thread::scope(|s| {
            let handles: Vec<_> = self
                .config
                .devices
                .iter()
                .map(|device| {
                    let handle = s.spawn(move || self.poll_device(device, api_key, timestamp));
                    (device, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(device, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        log::error!("Polling thread for {} panicked", device.name);
                        Outcome::Failed
                    })
                })
                .collect()
        })
    }

    fn poll_device(&self, device: &DeviceConfig, api_key: &str, timestamp: DateTime<Utc>) -> Outcome {
        if !device.enabled {
            log::debug!("Skipping disabled device: {}", device.name);
            return Outcome::Skipped(SkipReason::Disabled);
        }

        let reading = match self.homewizard.fetch(device, timestamp) {
            Ok(reading) => reading,
            Err(e) => {
                log::error!("{}", e);
                return Outcome::Skipped(SkipReason::FetchFailed);
            }
        };

        let path = csv_log::file_path(&self.config.output_folder, &device.id, timestamp);
        log::debug!("Writing data from {} to {:?}", device.name, path);
        if let Err(e) = csv_log::append_reading(&reading, &path) {
            log::error!("Error writing data to file: {}", e);
        }

        match &device.pvoutput {
            Some(binding) if binding.enabled => {
                match status::status_for(device, &reading, self.config.timezone) {
                    Some(payload) => {
                        if self.pvoutput.add_status(api_key, &binding.system_id, &payload) {
                            Outcome::Succeeded
                        } else {
                            Outcome::Failed
                        }
                    }
                    None => {
                        log::warn!("No PVOutput data for {}", device.name);
                        Outcome::Failed
                    }
                }
            }
            _ => {
                log::debug!("No PVOutput for {}", device.name);
                Outcome::Succeeded
            }
        }
    }
}
