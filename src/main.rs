//! txnstat CLI entry point

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use txnstat::config::{cli::Cli, toml::build_config, validator::validate_config};
use txnstat::{coordinator, output};

fn main() -> Result<()> {
    let main_start = Instant::now();

    // Parse CLI arguments
    let cli = Cli::parse_args();
    init_tracing(cli.debug);
    cli.validate()?;

    let config = build_config(&cli)?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!(?config, "resolved configuration");

    let report = coordinator::run(&config)?;
    output::write_report(&report, &config.output)?;

    debug!(
        elapsed_ms = main_start.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

/// Install the stderr diagnostics subscriber
///
/// `RUST_LOG` takes precedence; otherwise `--debug` selects debug output for
/// this crate and warnings only are shown by default.
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { "txnstat=debug" } else { "warn" })
    });

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
