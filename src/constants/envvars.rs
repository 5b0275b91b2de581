pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const POLLING_INTERVAL: &str = "POLLING_INTERVAL";
pub const TIMEZONE: &str = "TIMEZONE";
pub const OUTPUT_FOLDER: &str = "OUTPUT_FOLDER";
pub const DEVICES_FILE: &str = "DEVICES_FILE";

pub const PVOUTPUT_API_KEY: &str = "PVOUTPUT_API_KEY";
pub const PVOUTPUT_URL: &str = "PVOUTPUT_URL";

// Address overrides for the built-in device list, keyed by device id
pub const HOMEWIZARD_IP_OVERRIDES: &[(&str, &str)] = &[
    ("p1", "HOMEWIZARD_P1_IP"),
    ("water", "HOMEWIZARD_WATER_IP"),
    ("pv-dak", "HOMEWIZARD_ENERGY_IP"),
    ("pv-schuur", "HOMEWIZARD_SOCKET_IP"),
];
