use once_cell::sync::Lazy;
use ureq::tls::{TlsConfig, TlsProvider};
use ureq::Agent;

use crate::constants::defaults;

// One connection pool for the whole process
static AGENT: Lazy<Agent> = Lazy::new(build_agent);

/// Agent shared by the device and upload clients
///
/// Status codes come back as regular responses so callers can log the body
/// of a rejected request.
pub fn get_ureq_agent() -> Agent {
    AGENT.clone()
}

fn build_agent() -> Agent {
    let config = Agent::config_builder()
        .timeout_global(Some(defaults::API_REQUEST_TIMEOUT))
        .http_status_as_error(false)
        .tls_config(
            TlsConfig::builder()
                .provider(TlsProvider::NativeTls)
                .build(),
        )
        .build();
    Agent::new_with_config(config)
}
