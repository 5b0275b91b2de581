pub mod homewizard;
mod http_api;
pub mod pvoutput;

pub use homewizard::{FetchError, HomeWizardClient};
pub use pvoutput::PvOutputClient;
