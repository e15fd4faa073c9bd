//! Get subcommand for config-layers CLI
//!
//! Resolves one key across all sources and prints it as the requested type.

use super::OutputFormat;
use crate::config::Configuration;
use crate::value::Value;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key to resolve
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Type to coerce the value into
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
    pub value_type: ValueType,

    /// Value to print when the key is missing or does not convert
    ///
    /// Array defaults are comma-separated.
    #[arg(short, long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Output format: plain (default) or json
    #[arg(short, long, default_value = "plain", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Arguments read by `flag` sources
    #[arg(last = true, value_name = "ARGS")]
    pub flag_args: Vec<String>,
}

/// Target type for the get subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    String,
    IntArray,
    FloatArray,
    StringArray,
    /// The value as stored, without coercion
    Raw,
}

fn parse_default<T>(raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("Invalid default value '{}'", raw))
}

fn parse_default_list<T>(raw: &str) -> Result<Vec<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(parse_default).collect()
}

fn split_default(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(',').map(str::to_string).collect()
    }
}

/// Resolve the key as the requested type.
///
/// Without a default, lookup and conversion errors are returned. With one,
/// the matching `_or_default` accessor is used and this never fails on a
/// missing or unconvertible value.
pub fn resolve(config: &Configuration, args: &GetArgs) -> Result<Value> {
    let key = args.key.as_str();
    let value = match (args.value_type, args.default.as_deref()) {
        (ValueType::Int, None) => Value::from(config.get_int(key)?),
        (ValueType::Int, Some(d)) => {
            Value::from(config.get_int_or_default(key, parse_default(d)?))
        }
        (ValueType::Float, None) => Value::from(config.get_float(key)?),
        (ValueType::Float, Some(d)) => {
            Value::from(config.get_float_or_default(key, parse_default(d)?))
        }
        (ValueType::Bool, None) => Value::from(config.get_bool(key)?),
        (ValueType::Bool, Some(d)) => {
            Value::from(config.get_bool_or_default(key, parse_default(d)?))
        }
        (ValueType::String, None) => Value::from(config.get_string(key)?),
        (ValueType::String, Some(d)) => Value::from(config.get_string_or_default(key, d)),
        (ValueType::IntArray, None) => int_seq(config.get_int_array(key)?),
        (ValueType::IntArray, Some(d)) => {
            int_seq(config.get_int_array_or_default(key, parse_default_list(d)?))
        }
        (ValueType::FloatArray, None) => float_seq(config.get_float_array(key)?),
        (ValueType::FloatArray, Some(d)) => {
            float_seq(config.get_float_array_or_default(key, parse_default_list(d)?))
        }
        (ValueType::StringArray, None) => Value::from(config.get_string_array(key)?),
        (ValueType::StringArray, Some(d)) => {
            Value::from(config.get_string_array_or_default(key, split_default(d)))
        }
        (ValueType::Raw, None) => config.get_value(key)?,
        (ValueType::Raw, Some(d)) => config
            .get_value(key)
            .unwrap_or_else(|_| Value::from(d)),
    };
    Ok(value)
}

fn int_seq(items: Vec<i64>) -> Value {
    Value::Seq(items.into_iter().map(Value::from).collect())
}

fn float_seq(items: Vec<f64>) -> Value {
    Value::Seq(items.into_iter().map(Value::from).collect())
}

/// Write a resolved value. Plain output puts array elements on their own line.
pub fn write_value(out: &mut impl Write, value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => match value {
            Value::Seq(items) => {
                for item in items {
                    writeln!(out, "{}", item)?;
                }
            }
            Value::StringSeq(items) => {
                for item in items {
                    writeln!(out, "{}", item)?;
                }
            }
            other => writeln!(out, "{}", other)?,
        },
    }
    Ok(())
}

/// Run the get subcommand.
pub fn run_get(config: &Configuration, args: &GetArgs, out: &mut impl Write) -> Result<()> {
    let value = resolve(config, args)
        .with_context(|| format!("Failed to resolve '{}'", args.key))?;
    write_value(out, &value, args.format)
}
