#![allow(dead_code)]
// Each integration test binary uses a different subset of these helpers

use std::path::Path;

use chrono_tz::Tz;

use hwlogger::data_mgmt::DeviceType;
use hwlogger::node_mgmt::config::{
    Config, DeviceConfig, HomeWizardAddress, PvOutputBinding, PvOutputSettings, SystemCategory,
};

pub const API_KEY: &str = "test-api-key";
pub const ADDSTATUS_PATH: &str = "/service/r2/addstatus.jsp";

pub fn device(id: &str, device_type: DeviceType, address: &str) -> DeviceConfig {
    DeviceConfig {
        id: id.to_string(),
        name: format!("Device {id}"),
        device_type,
        homewizard: HomeWizardAddress {
            ip: address.to_string(),
            mac: None,
        },
        enabled: true,
        pvoutput: None,
    }
}

pub fn disabled(mut device: DeviceConfig) -> DeviceConfig {
    device.enabled = false;
    device
}

pub fn uploading(mut device: DeviceConfig, system_id: &str) -> DeviceConfig {
    device.pvoutput = Some(PvOutputBinding {
        enabled: true,
        system_id: system_id.to_string(),
        category: SystemCategory::SolarPv,
        mapping: None,
    });
    device
}

pub fn config(
    output_folder: &Path,
    pvoutput_base_url: &str,
    api_key: Option<&str>,
    devices: Vec<DeviceConfig>,
) -> Config {
    Config {
        polling_interval: 5,
        timezone: Tz::UTC,
        output_folder: output_folder.to_path_buf(),
        pvoutput: PvOutputSettings {
            api_key: api_key.map(String::from),
            url: format!("{pvoutput_base_url}{ADDSTATUS_PATH}"),
        },
        devices,
    }
}

pub const DEVICES_FILE_ONE_PLUG: &str = r#"
[
    {
        "id": "garage",
        "name": "Garage Socket",
        "type": "smart_plug",
        "homewizard": { "ip": "{ADDRESS}" }
    },
    {
        "id": "attic",
        "name": "Attic Meter",
        "type": "kwh_meter",
        "enabled": false,
        "homewizard": { "ip": "192.0.2.1" },
        "pvoutput": { "system_id": "1", "type": "solar-pv" }
    }
]
"#;
