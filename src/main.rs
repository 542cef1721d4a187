use bowl_builder::{app, logging, Config};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(&config)?;

    app::run(config).await?;

    // The stdin reader may still be parked in a blocking read
    std::process::exit(0);
}
