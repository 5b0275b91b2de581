use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::data_mgmt::models::Reading;
use crate::node_mgmt::config::DeviceConfig;

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H:%M";

/// Fields of a PVOutput `addstatus` request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusPayload {
    /// Date, `YYYYMMDD`
    pub d: String,
    /// Time, `HH:MM`
    pub t: String,
    /// Lifetime energy generation in Wh
    pub v1: String,
    /// Power generation in W, production negative
    pub v2: String,
}

/// How a reading turns into a status payload
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusMapping {
    /// Exported kWh counter and active power of a production meter
    SolarExport,
    /// Never produces a payload
    #[serde(rename = "none")]
    NoUpload,
}

impl StatusMapping {
    pub fn map(&self, reading: &Reading, timezone: Tz) -> Option<StatusPayload> {
        match self {
            StatusMapping::SolarExport => solar_export(reading, timezone),
            StatusMapping::NoUpload => None,
        }
    }
}

fn solar_export(reading: &Reading, timezone: Tz) -> Option<StatusPayload> {
    let export_kwh = reading.data.total_power_export_kwh()?;
    let power_w = reading.data.active_power_w()?;
    let local = reading.timestamp.with_timezone(&timezone);

    Some(StatusPayload {
        d: local.format(DATE_FORMAT).to_string(),
        t: local.format(TIME_FORMAT).to_string(),
        v1: round_to_int(1000.0 * export_kwh).to_string(),
        v2: round_to_int(-power_w).to_string(),
    })
}

// Integer rendering also avoids "-0" for a zero power reading
fn round_to_int(value: f64) -> i64 {
    value.round() as i64
}

/// Status payload for a device's reading, if the device uploads at all
pub fn status_for(device: &DeviceConfig, reading: &Reading, timezone: Tz) -> Option<StatusPayload> {
    let binding = device.pvoutput.as_ref().filter(|b| b.enabled)?;
    binding
        .mapping
        .unwrap_or_else(|| device.device_type.default_status_mapping())
        .map(reading, timezone)
}
