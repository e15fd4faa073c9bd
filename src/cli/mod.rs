//! CLI command definitions for config-layers
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod get;
pub mod sources;

use crate::config::{ConfigSource, Configuration, SourceKind};
use clap::{Parser, Subcommand};
use get::GetArgs;
use sources::SourcesArgs;
use tracing::debug;

/// Read layered configuration from the environment, flags, JSON and YAML files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration source, in precedence order (later wins)
    ///
    /// Accepted forms: env, flag, json:<path>, yaml:<path>.
    /// Defaults to env when no source is given.
    #[arg(short, long = "source", value_name = "SPEC", global = true)]
    pub sources: Vec<ConfigSource>,

    /// Fail if any source could not be loaded
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a key and print its value
    Get(GetArgs),

    /// List the configured sources and their load status
    Sources(SourcesArgs),
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: plain, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Build a configuration from source descriptors, in order.
///
/// Flag sources read `flag_args` (the arguments after `--`) rather than the
/// whole process command line. With no descriptors the environment is used.
pub fn build_configuration(sources: &[ConfigSource], flag_args: &[String]) -> Configuration {
    let env_only = [ConfigSource::env()];
    let sources = if sources.is_empty() {
        &env_only[..]
    } else {
        sources
    };

    sources.iter().fold(Configuration::new(), |config, source| {
        let source = match source.kind {
            SourceKind::Flag { .. } => ConfigSource::flags(flag_args.iter().cloned()),
            _ => source.clone(),
        };
        debug!(source = %source, "Adding config source");
        config.add_config_source(source)
    })
}
