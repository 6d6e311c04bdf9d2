use std::{io, process::ExitCode};

use env_logger::Env;
use lokaal::{
    commands::maps,
    configuration::get_configuration,
    services::{ChromeLauncher, FixedPathLocator},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;
    let locator = FixedPathLocator::beside_executable()?;
    let launcher = ChromeLauncher::new(configuration.scraper.clone());

    let stdin = io::stdin();
    let status = maps::run(
        &mut stdin.lock(),
        &mut io::stdout(),
        &locator,
        &launcher,
        &configuration.scraper,
    )
    .await?;

    Ok(ExitCode::from(status))
}
