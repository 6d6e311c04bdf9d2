use std::io;

use env_logger::Env;
use lokaal::{commands::gebied, configuration::get_configuration, services::GebiedResolver};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;
    let resolver = GebiedResolver::new(configuration.resolver);

    let stdin = io::stdin();
    gebied::run(&mut stdin.lock(), &mut io::stdout(), &resolver).await?;

    Ok(())
}
