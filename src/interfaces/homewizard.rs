//! Client for the HomeWizard local API
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use ureq::Agent;

use crate::data_mgmt::models::{DeviceData, Reading};
use crate::node_mgmt::config::DeviceConfig;

use super::http_api::get_ureq_agent;

const DATA_PATH: &str = "/api/v1/data";

#[derive(Error, Debug)]
pub enum FetchCause {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error(transparent)]
    Http(#[from] ureq::Error),
    #[error("invalid reading: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
#[error("fetching data from {device} failed: {cause}")]
pub struct FetchError {
    pub device: String,
    #[source]
    pub cause: FetchCause,
}

pub struct HomeWizardClient {
    agent: Agent,
}

impl HomeWizardClient {
    pub fn new() -> Self {
        Self {
            agent: get_ureq_agent(),
        }
    }

    /// Take a reading from the device and stamp it with the round's timestamp
    pub fn fetch(
        &self,
        device: &DeviceConfig,
        timestamp: DateTime<Utc>,
    ) -> Result<Reading, FetchError> {
        let fail = |cause: FetchCause| FetchError {
            device: device.name.clone(),
            cause,
        };

        let url = data_url(&device.homewizard.ip);
        log::debug!("Fetching data from {} at {}", device.name, url);

        let mut response = self
            .agent
            .get(url.as_str())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| fail(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Device {} returned HTTP status {}", device.name, status);
            return Err(fail(FetchCause::Status(status.as_u16())));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| fail(e.into()))?;
        let value: Value = serde_json::from_str(&body).map_err(|e| fail(e.into()))?;
        let data = DeviceData::from_value(device.device_type, value).map_err(|e| fail(e.into()))?;

        Ok(Reading {
            device_id: device.id.clone(),
            device_name: device.name.clone(),
            device_type: device.device_type,
            timestamp,
            data,
        })
    }
}

impl Default for HomeWizardClient {
    fn default() -> Self {
        HomeWizardClient::new()
    }
}

fn data_url(address: &str) -> String {
    format!("http://{address}{DATA_PATH}")
}
