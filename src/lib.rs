//! Layered configuration reader.
//!
//! This module exports the core components for testing and integration.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod value;

pub use config::{ConfigSource, Configuration};
pub use error::{ConfigError, ConvertError, LoadError};
pub use value::Value;
