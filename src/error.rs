//! Structured error types for loading, lookup and coercion.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a file-backed source.
///
/// Load errors are never returned from `add_config_source`; they are kept on
/// the source that produced them and raise the configuration's error flag.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("document root in {} is a {found}, expected a mapping", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },
}

/// Failure to coerce a value into the requested type.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The value's kind has no conversion to the target type.
    #[error("unknown type: {0}")]
    UnknownType(&'static str),

    /// The kind converts in general, but this value is outside the accepted domain.
    #[error("unknown value: {0}")]
    UnknownValue(String),

    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),
}

/// Errors returned by the typed accessors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the key '{0}' is not found among config sources")]
    KeyNotFound(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("value of '{0}' is not an array or slice")]
    NotAnArray(String),
}

impl ConfigError {
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, ConfigError::KeyNotFound(_))
    }
}

/// Result type for accessor operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_are_verbatim() {
        let parse_err = "abc".parse::<i64>().unwrap_err();
        let expected = parse_err.to_string();
        let err = ConfigError::from(ConvertError::from(parse_err));
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ConfigError::KeyNotFound("port".into()).to_string(),
            "the key 'port' is not found among config sources"
        );
        assert_eq!(
            ConfigError::NotAnArray("port".into()).to_string(),
            "value of 'port' is not an array or slice"
        );
        assert_eq!(
            ConvertError::UnknownValue("7".into()).to_string(),
            "unknown value: 7"
        );
        assert!(ConfigError::KeyNotFound("x".into()).is_key_not_found());
    }
}
