#![allow(dead_code)]

pub const KWH_METER: &str = r#"{
    "wifi_ssid": "My Wi-Fi",
    "wifi_strength": 100,
    "total_power_import_kwh": 0.003,
    "total_power_import_t1_kwh": 0.003,
    "total_power_export_kwh": 1.234,
    "total_power_export_t1_kwh": 1.234,
    "active_power_w": 500,
    "active_power_l1_w": 500,
    "active_voltage_v": 230.1,
    "active_current_a": 2.17,
    "active_reactive_power_var": -0.5,
    "active_apparent_power_va": 500.2,
    "active_power_factor": 0.999,
    "active_frequency_hz": 50.01
}"#;

pub const SMART_PLUG: &str = r#"{
    "wifi_ssid": "My Wi-Fi",
    "wifi_strength": 56,
    "total_power_import_kwh": 30.511,
    "total_power_import_t1_kwh": 30.511,
    "total_power_export_kwh": 85.951,
    "total_power_export_t1_kwh": 85.951,
    "active_power_w": 543,
    "active_power_l1_w": 543,
    "active_voltage_v": 231.1,
    "active_current_a": 2.346,
    "active_frequency_hz": 50.005
}"#;

pub const WATER_METER: &str = r#"{
    "wifi_ssid": "My Wi-Fi",
    "wifi_strength": 84,
    "total_liter_m3": 123.456,
    "active_liter_lpm": 7.2,
    "total_liter_offset_m3": 0
}"#;
