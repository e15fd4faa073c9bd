//! config-layers
//!
//! Resolves keys from layered configuration sources (environment, flags,
//! JSON and YAML files) and prints them as typed values.

use anyhow::{Result, bail};
use clap::Parser;
use config_layers::cli::get::run_get;
use config_layers::cli::sources::run_sources;
use config_layers::cli::{Cli, Command, build_configuration};
use config_layers::logging::{LogTarget, init_logging};
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogTarget::parse(&cli.log), cli.verbose)?;

    let flag_args = match &cli.command {
        Command::Get(args) => args.flag_args.as_slice(),
        Command::Sources(args) => args.flag_args.as_slice(),
    };
    let config = build_configuration(&cli.sources, flag_args);
    info!(sources = config.len(), has_error = config.has_error(), "Configuration loaded");

    if config.has_error() {
        for source in config.sources() {
            if let Some(err) = source.load_error() {
                warn!(source = %source.source(), "{}", err);
            }
        }
        if cli.strict {
            bail!("One or more configuration sources failed to load");
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Get(args) => run_get(&config, args, &mut out)?,
        Command::Sources(args) => run_sources(&config, args, &mut out)?,
    }

    Ok(())
}
