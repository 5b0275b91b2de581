use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data_mgmt::status::StatusMapping;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    /// Smart meter P1 dongle (electricity and gas)
    P1Meter,
    /// kWh meter on a single circuit, e.g. a PV installation
    KwhMeter,
    WaterMeter,
    /// Energy socket
    SmartPlug,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::P1Meter => "p1_meter",
            DeviceType::KwhMeter => "kwh_meter",
            DeviceType::WaterMeter => "water_meter",
            DeviceType::SmartPlug => "smart_plug",
        }
    }

    /// Status mapping used when a PVOutput binding does not name one
    pub fn default_status_mapping(&self) -> StatusMapping {
        match self {
            DeviceType::P1Meter | DeviceType::KwhMeter | DeviceType::SmartPlug => {
                StatusMapping::SolarExport
            }
            DeviceType::WaterMeter => StatusMapping::NoUpload,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Field lists follow the HomeWizard local API v1 `/api/v1/data` responses.
// Everything is optional, and anything the firmware adds lands in `extra`,
// as does a known field whose value has an unexpected JSON type.

/// Catch-all for fields that don't fit the typed part of a payload
pub trait ExtraFields {
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

macro_rules! impl_extra_fields {
    ($($t:ty),*) => {
        $(impl ExtraFields for $t {
            fn extra_mut(&mut self) -> &mut Map<String, Value> {
                &mut self.extra
            }
        })*
    };
}

impl_extra_fields!(P1MeterData, KwhMeterData, SmartPlugData, WaterMeterData);

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct P1MeterData {
    pub wifi_ssid: Option<String>,
    pub wifi_strength: Option<f64>,
    pub smr_version: Option<u32>,
    pub meter_model: Option<String>,
    pub unique_id: Option<String>,
    pub active_tariff: Option<u32>,
    pub total_power_import_kwh: Option<f64>,
    pub total_power_import_t1_kwh: Option<f64>,
    pub total_power_import_t2_kwh: Option<f64>,
    pub total_power_export_kwh: Option<f64>,
    pub total_power_export_t1_kwh: Option<f64>,
    pub total_power_export_t2_kwh: Option<f64>,
    pub active_power_w: Option<f64>,
    pub active_power_l1_w: Option<f64>,
    pub active_voltage_l1_v: Option<f64>,
    pub active_current_a: Option<f64>,
    pub active_current_l1_a: Option<f64>,
    pub voltage_sag_l1_count: Option<u64>,
    pub voltage_swell_l1_count: Option<u64>,
    pub any_power_fail_count: Option<u64>,
    pub long_power_fail_count: Option<u64>,
    pub total_gas_m3: Option<f64>,
    pub gas_timestamp: Option<u64>,
    pub gas_unique_id: Option<String>,
    /// Sub-meters (gas, heat, water) read through the P1 port, kept as sent
    pub external: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KwhMeterData {
    pub wifi_ssid: Option<String>,
    pub wifi_strength: Option<f64>,
    pub total_power_import_kwh: Option<f64>,
    pub total_power_import_t1_kwh: Option<f64>,
    pub total_power_export_kwh: Option<f64>,
    pub total_power_export_t1_kwh: Option<f64>,
    pub active_power_w: Option<f64>,
    pub active_power_l1_w: Option<f64>,
    pub active_voltage_v: Option<f64>,
    pub active_current_a: Option<f64>,
    pub active_reactive_power_var: Option<f64>,
    pub active_apparent_power_va: Option<f64>,
    pub active_power_factor: Option<f64>,
    pub active_frequency_hz: Option<f64>,
    pub active_apparent_current_a: Option<f64>,
    pub active_reactive_current_a: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SmartPlugData {
    pub wifi_ssid: Option<String>,
    pub wifi_strength: Option<f64>,
    pub total_power_import_kwh: Option<f64>,
    pub total_power_import_t1_kwh: Option<f64>,
    pub total_power_export_kwh: Option<f64>,
    pub total_power_export_t1_kwh: Option<f64>,
    pub active_power_w: Option<f64>,
    pub active_power_l1_w: Option<f64>,
    pub active_voltage_v: Option<f64>,
    pub active_current_a: Option<f64>,
    pub active_reactive_power_var: Option<f64>,
    pub active_apparent_power_va: Option<f64>,
    pub active_power_factor: Option<f64>,
    pub active_frequency_hz: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct WaterMeterData {
    pub wifi_ssid: Option<String>,
    pub wifi_strength: Option<f64>,
    pub total_liter_m3: Option<f64>,
    pub active_liter_lpm: Option<f64>,
    pub total_liter_offset_m3: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Type-specific part of a reading
///
/// Serializes as the bare inner struct; the variant is picked from the
/// configured device type when decoding, see [`DeviceData::from_value`].
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DeviceData {
    P1Meter(P1MeterData),
    KwhMeter(KwhMeterData),
    WaterMeter(WaterMeterData),
    SmartPlug(SmartPlugData),
}

impl DeviceData {
    /// Decode a device response; only a body that is not a JSON object fails
    pub fn from_value(device_type: DeviceType, value: Value) -> Result<Self, serde_json::Error> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(de::Error::invalid_type(unexpected(&other), &"a JSON object"));
            }
        };
        Ok(match device_type {
            DeviceType::P1Meter => DeviceData::P1Meter(decode_lenient(map)?),
            DeviceType::KwhMeter => DeviceData::KwhMeter(decode_lenient(map)?),
            DeviceType::WaterMeter => DeviceData::WaterMeter(decode_lenient(map)?),
            DeviceType::SmartPlug => DeviceData::SmartPlug(decode_lenient(map)?),
        })
    }

    pub fn device_type(&self) -> DeviceType {
        match self {
            DeviceData::P1Meter(_) => DeviceType::P1Meter,
            DeviceData::KwhMeter(_) => DeviceType::KwhMeter,
            DeviceData::WaterMeter(_) => DeviceType::WaterMeter,
            DeviceData::SmartPlug(_) => DeviceType::SmartPlug,
        }
    }

    pub fn total_power_export_kwh(&self) -> Option<f64> {
        match self {
            DeviceData::P1Meter(d) => d.total_power_export_kwh,
            DeviceData::KwhMeter(d) => d.total_power_export_kwh,
            DeviceData::SmartPlug(d) => d.total_power_export_kwh,
            DeviceData::WaterMeter(_) => None,
        }
    }

    pub fn active_power_w(&self) -> Option<f64> {
        match self {
            DeviceData::P1Meter(d) => d.active_power_w,
            DeviceData::KwhMeter(d) => d.active_power_w,
            DeviceData::SmartPlug(d) => d.active_power_w,
            DeviceData::WaterMeter(_) => None,
        }
    }
}

fn decode_lenient<T>(map: Map<String, Value>) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + ExtraFields,
{
    if let Ok(data) = serde_json::from_value(Value::Object(map.clone())) {
        return Ok(data);
    }

    // Some field has the wrong type: sort them out one by one
    let (mut typed, mut mistyped) = (Map::new(), Map::new());
    for (name, field) in map {
        let single = Map::from_iter([(name.clone(), field.clone())]);
        if serde_json::from_value::<T>(Value::Object(single)).is_ok() {
            typed.insert(name, field);
        } else {
            mistyped.insert(name, field);
        }
    }

    let mut data: T = serde_json::from_value(Value::Object(typed))?;
    for (name, field) in mistyped {
        log::warn!("Unexpected value for field '{}': {}", name, field);
        data.extra_mut().insert(name, field);
    }
    Ok(data)
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

/// One device's snapshot, taken during a polling round
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub device_id: String,
    pub device_name: String,
    pub device_type: DeviceType,
    pub timestamp: DateTime<Utc>,
    pub data: DeviceData,
}

pub const ENVELOPE_FIELDS: [&str; 4] = ["deviceId", "deviceName", "deviceType", "timestamp"];

impl Reading {
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// All fields of the reading in a stable order
    ///
    /// Device fields come first, in the order the device type declares them
    /// followed by any unknown fields; the envelope fields close the list.
    pub fn fields(&self) -> Result<Vec<(String, Value)>, serde_json::Error> {
        let mut fields: Vec<(String, Value)> = match serde_json::to_value(&self.data)? {
            Value::Object(map) => map.into_iter().collect(),
            other => vec![("data".to_string(), other)],
        };

        let envelope = [
            Value::String(self.device_id.clone()),
            Value::String(self.device_name.clone()),
            Value::String(self.device_type.to_string()),
            Value::String(self.timestamp_iso()),
        ];
        for (name, value) in ENVELOPE_FIELDS.iter().zip(envelope) {
            fields.retain(|(k, _)| k != name);
            fields.push((name.to_string(), value));
        }
        Ok(fields)
    }
}
