/// Devices polled when no `DEVICES_FILE` is given
///
/// Addresses can be overridden per device, see
/// [`HOMEWIZARD_IP_OVERRIDES`](crate::constants::envvars::HOMEWIZARD_IP_OVERRIDES).
pub const DEFAULT_DEVICES: &str = r#"
[
    {
        "id": "p1",
        "name": "P1 Energy Meter",
        "type": "p1_meter",
        "enabled": true,
        "homewizard": { "ip": "192.168.178.128", "mac": "5C:2F:AF:1B:8D:92" }
    },
    {
        "id": "water",
        "name": "Water Meter",
        "type": "water_meter",
        "enabled": true,
        "homewizard": { "ip": "192.168.178.127", "mac": "5C:2F:AF:19:89:14" }
    },
    {
        "id": "pv-dak",
        "name": "Energy Meter",
        "type": "kwh_meter",
        "enabled": true,
        "homewizard": { "ip": "192.168.178.114", "mac": "5C:2F:AF:1D:E1:5C" },
        "pvoutput": { "enabled": true, "system_id": "109097", "type": "solar-pv" }
    },
    {
        "id": "pv-schuur",
        "name": "Energy Socket",
        "type": "smart_plug",
        "enabled": true,
        "homewizard": { "ip": "192.168.178.113", "mac": "5C:2F:AF:1E:F1:40" },
        "pvoutput": { "enabled": true, "system_id": "109096", "type": "solar-pv" }
    }
]
"#;
