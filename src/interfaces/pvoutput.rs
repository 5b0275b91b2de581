//! PVOutput `addstatus` client
//!
//! Uploads are best effort: every failure is logged and reported as `false`,
//! and the next polling round is the only retry.
use ureq::Agent;
use url::form_urlencoded;

use crate::data_mgmt::status::StatusPayload;

use super::http_api::get_ureq_agent;

const APIKEY_HEADER: &str = "X-Pvoutput-Apikey";
const SYSTEMID_HEADER: &str = "X-Pvoutput-SystemId";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// v1 (and v3) are lifetime totals rather than energy since midnight
const CUMULATIVE_FLAG: (&str, &str) = ("c1", "1");

pub struct PvOutputClient {
    agent: Agent,
    url: String,
}

impl PvOutputClient {
    pub fn new(url: &str) -> Self {
        Self {
            agent: get_ureq_agent(),
            url: url.to_string(),
        }
    }

    pub fn add_status(&self, api_key: &str, system_id: &str, status: &StatusPayload) -> bool {
        let params = encode_status(status);
        let url = format!("{}?{}", self.url, params);
        log::debug!("Sending status to PVOutput system {}: {}", system_id, params);

        let result = self
            .agent
            .post(url.as_str())
            .header(APIKEY_HEADER, api_key)
            .header(SYSTEMID_HEADER, system_id)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .send(params.as_str());

        match result {
            Ok(response) if response.status().is_success() => {
                log::info!(
                    "Successfully sent data to PVOutput system {}: {:?}",
                    system_id,
                    status
                );
                true
            }
            Ok(mut response) => {
                let info = response
                    .body_mut()
                    .read_to_string()
                    .unwrap_or_else(|e| format!("<unreadable response body: {e}>"));
                log::error!(
                    "PVOutput rejected status for system {} (HTTP {}): {}",
                    system_id,
                    response.status(),
                    info
                );
                false
            }
            Err(e) => {
                log::error!("Error sending data to PVOutput system {}: {}", system_id, e);
                false
            }
        }
    }
}

fn encode_status(status: &StatusPayload) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("d", &status.d)
        .append_pair("t", &status.t)
        .append_pair("v1", &status.v1)
        .append_pair("v2", &status.v2)
        .append_pair(CUMULATIVE_FLAG.0, CUMULATIVE_FLAG.1)
        .finish()
}
