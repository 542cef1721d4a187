use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::Config;


// Default filter when RUST_LOG is unset
fn default_filter(config: &Config) -> &'static str {
    match (&config.log_file, config.verbose) {
        (Some(_), true) => "bowl_builder=debug",
        (Some(_), false) => "bowl_builder=info",
        // stderr shares the terminal with the dashboard, keep it quiet
        (None, true) => "bowl_builder=info",
        (None, false) => "bowl_builder=warn",
    }
}

/// Install the global subscriber. Logs go to `--log-file` when given,
/// otherwise to stderr.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}
