use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{defaults, envvars};
use crate::data_mgmt::models::DeviceType;
use crate::data_mgmt::status::StatusMapping;

use super::devices::DEFAULT_DEVICES;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse device list JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("could not read device list {path:?}: {source}")]
    DevicesFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("duplicate device id: {0}")]
    DuplicateDevice(String),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HomeWizardAddress {
    /// Host or IP address, optionally with `:port`
    pub ip: String,
    pub mac: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SystemCategory {
    SolarPv,
    Consumption,
}

/// Links a device to a PVOutput system
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PvOutputBinding {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub system_id: String,
    #[serde(rename = "type")]
    pub category: SystemCategory,
    /// Falls back to the device type's default mapping
    #[serde(default)]
    pub mapping: Option<StatusMapping>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DeviceConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub homewizard: HomeWizardAddress,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub pvoutput: Option<PvOutputBinding>,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq)]
pub struct PvOutputSettings {
    pub api_key: Option<String>,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Minutes between polling rounds
    pub polling_interval: u32,
    pub timezone: Tz,
    pub output_folder: PathBuf,
    pub pvoutput: PvOutputSettings,
    pub devices: Vec<DeviceConfig>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        let polling_interval = parse_polling_interval(
            &env_or(envvars::POLLING_INTERVAL, &defaults::POLLING_INTERVAL_MINUTES.to_string()),
        )?;
        let timezone = parse_timezone(&env_or(envvars::TIMEZONE, defaults::TIMEZONE))?;

        let devices = match env_opt(envvars::DEVICES_FILE) {
            Some(path) => devices_from_file(Path::new(&path))?,
            None => default_devices()?,
        };

        Ok(Config {
            polling_interval,
            timezone,
            output_folder: env_or(envvars::OUTPUT_FOLDER, defaults::OUTPUT_FOLDER).into(),
            pvoutput: PvOutputSettings {
                api_key: env_opt(envvars::PVOUTPUT_API_KEY),
                url: env_or(envvars::PVOUTPUT_URL, defaults::PVOUTPUT_ADDSTATUS_URL),
            },
            devices,
        })
    }

    /// Checks that must pass before the first polling round
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pvoutput.api_key.is_none() {
            return Err(ConfigError::MissingEnvVar(envvars::PVOUTPUT_API_KEY));
        }
        let mut seen = HashSet::new();
        for device in &self.devices {
            if !seen.insert(device.id.as_str()) {
                return Err(ConfigError::DuplicateDevice(device.id.clone()));
            }
        }
        Ok(())
    }

    pub fn enabled_devices(&self) -> impl Iterator<Item = &DeviceConfig> {
        self.devices.iter().filter(|d| d.enabled)
    }
}

/// Optional settings absent from the environment, with the default used for each
pub fn defaulted_settings() -> Vec<(&'static str, String)> {
    [
        (envvars::LOG_LEVEL, defaults::LOG_LEVEL.to_string()),
        (
            envvars::POLLING_INTERVAL,
            defaults::POLLING_INTERVAL_MINUTES.to_string(),
        ),
        (envvars::TIMEZONE, defaults::TIMEZONE.to_string()),
        (envvars::OUTPUT_FOLDER, defaults::OUTPUT_FOLDER.to_string()),
        (envvars::PVOUTPUT_URL, defaults::PVOUTPUT_ADDSTATUS_URL.to_string()),
    ]
    .into_iter()
    .filter(|(var, _)| env_opt(var).is_none())
    .collect()
}

fn env_opt(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(var: &str, default: &str) -> String {
    env_opt(var).unwrap_or_else(|| default.to_string())
}

fn parse_polling_interval(value: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        var: envvars::POLLING_INTERVAL,
        value: value.to_string(),
        reason,
    };
    match value.trim().parse::<u32>() {
        Ok(0) => Err(invalid("must be at least 1 minute".into())),
        Ok(minutes) => Ok(minutes),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn parse_timezone(value: &str) -> Result<Tz, ConfigError> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|e| ConfigError::InvalidValue {
            var: envvars::TIMEZONE,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

pub fn devices_from_str(devices_raw: &str) -> Result<Vec<DeviceConfig>, ConfigError> {
    serde_json::from_str::<Vec<DeviceConfig>>(devices_raw).map_err(Into::into)
}

pub fn devices_from_file(path: &Path) -> Result<Vec<DeviceConfig>, ConfigError> {
    let devices_raw = fs::read_to_string(path).map_err(|source| ConfigError::DevicesFile {
        path: path.to_path_buf(),
        source,
    })?;
    devices_from_str(&devices_raw)
}

/// Built-in device list, with addresses overridable through the environment
fn default_devices() -> Result<Vec<DeviceConfig>, ConfigError> {
    let mut devices = devices_from_str(DEFAULT_DEVICES)?;
    for device in devices.iter_mut() {
        let override_var = envvars::HOMEWIZARD_IP_OVERRIDES
            .iter()
            .find(|(id, _)| *id == device.id)
            .map(|(_, var)| *var);
        if let Some(ip) = override_var.and_then(env_opt) {
            log::debug!("Using {} for device {}", ip, device.id);
            device.homewizard.ip = ip;
        }
    }
    Ok(devices)
}
