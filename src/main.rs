use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;

use hwlogger::command;
use hwlogger::constants::{defaults, envvars};
use hwlogger::node_mgmt::{config, Config};

const CMD_START: &str = "start";
const CMD_ONCE: &str = "once";

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let run: fn(&Config) -> Result<()> = match args.subcommand()?.as_deref() {
        Some(CMD_START) => command::start,
        Some(CMD_ONCE) => command::once,
        _ => return Err(anyhow!("Subcommand must be one of 'start', 'once'")),
    };

    for (var, default) in config::defaulted_settings() {
        log::info!("{} not set, using default '{}'", var, default);
    }
    let config = Config::from_env()?;
    config.validate()?;
    log::info!(
        "Running with {} devices, polling every {} minutes ({}), output folder {:?}",
        config.devices.len(),
        config.polling_interval,
        config.timezone,
        config.output_folder
    );

    run(&config)
}
