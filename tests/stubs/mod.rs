pub mod config;
pub mod responses;
