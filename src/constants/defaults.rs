use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const LOG_LEVEL: &str = "info";

pub const POLLING_INTERVAL_MINUTES: u32 = 5;
pub const TIMEZONE: &str = "UTC";
pub const OUTPUT_FOLDER: &str = "./logs";
pub const PVOUTPUT_ADDSTATUS_URL: &str = "https://pvoutput.org/service/r2/addstatus.jsp";
