//! Sources subcommand for config-layers CLI
//!
//! Lists every configured source in precedence order with its load status.

use super::OutputFormat;
use crate::config::{ConfigSource, Configuration, LoadedSource};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;

/// Arguments for the sources subcommand
#[derive(Args, Debug)]
pub struct SourcesArgs {
    /// Output format: plain (default) or json
    #[arg(short, long, default_value = "plain", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Arguments read by `flag` sources
    #[arg(last = true, value_name = "ARGS")]
    pub flag_args: Vec<String>,
}

/// Load status of one source.
#[derive(Debug, Serialize)]
pub struct SourceReport<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub source: &'a ConfigSource,
    /// Snapshotted key count; absent for the live environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> SourceReport<'a> {
    fn new(index: usize, loaded: &'a LoadedSource) -> Self {
        Self {
            index,
            source: loaded.source(),
            keys: loaded.key_count(),
            error: loaded.load_error().map(|e| e.to_string()),
        }
    }

    fn status(&self) -> String {
        match (&self.error, self.keys) {
            (Some(err), _) => format!("error: {}", err),
            (None, Some(keys)) => format!("ok ({} keys)", keys),
            (None, None) => "live".to_string(),
        }
    }
}

/// Collect a report for every source, lowest precedence first.
pub fn reports(config: &Configuration) -> Vec<SourceReport<'_>> {
    config
        .sources()
        .enumerate()
        .map(|(index, loaded)| SourceReport::new(index, loaded))
        .collect()
}

/// Run the sources subcommand.
pub fn run_sources(config: &Configuration, args: &SourcesArgs, out: &mut impl Write) -> Result<()> {
    let reports = reports(config);
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for report in &reports {
                writeln!(out, "{}. {} - {}", report.index, report.source, report.status())?;
            }
        }
    }
    Ok(())
}
