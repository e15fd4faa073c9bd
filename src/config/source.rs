//! Configuration source descriptors.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File formats that can back a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Json,
    Yaml,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Json => write!(f, "json"),
            FileFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Where a source's values come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceKind {
    /// The live process environment, consulted on every lookup.
    Env,
    /// Command-line style arguments, parsed once when the source is added.
    Flag { args: Vec<String> },
    /// A JSON or YAML file, read once when the source is added.
    File { format: FileFormat, path: PathBuf },
}

/// Describes one configuration source. Sources are evaluated in the order
/// they are added; later sources win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSource {
    #[serde(flatten)]
    pub kind: SourceKind,
}

impl ConfigSource {
    pub fn env() -> Self {
        Self {
            kind: SourceKind::Env,
        }
    }

    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::file(FileFormat::Json, path)
    }

    pub fn yaml(path: impl Into<PathBuf>) -> Self {
        Self::file(FileFormat::Yaml, path)
    }

    pub fn file(format: FileFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::File {
                format,
                path: path.into(),
            },
        }
    }

    /// A flag source over an explicit argument list (program name excluded).
    pub fn flags<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: SourceKind::Flag {
                args: args.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// A flag source over the current process arguments.
    pub fn process_flags() -> Self {
        Self::flags(std::env::args().skip(1))
    }

    /// Path of the backing file, if this is a file source.
    pub fn file_path(&self) -> Option<&Path> {
        match &self.kind {
            SourceKind::File { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::Env => write!(f, "env"),
            SourceKind::Flag { args } => write!(f, "flag ({} args)", args.len()),
            SourceKind::File { format, path } => write!(f, "{}:{}", format, path.display()),
        }
    }
}

/// Error returned when a source descriptor string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid source '{0}': expected env, flag, json:<path> or yaml:<path>")]
pub struct ParseSourceError(pub String);

impl FromStr for ConfigSource {
    type Err = ParseSourceError;

    /// Parse `env`, `flag`, `json:<path>` or `yaml:<path>`.
    ///
    /// `flag` captures the current process arguments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, path) = match s.split_once(':') {
            Some((kind, path)) => (kind, Some(path)),
            None => (s, None),
        };
        match (kind.to_lowercase().as_str(), path) {
            ("env", None) => Ok(Self::env()),
            ("flag", None) => Ok(Self::process_flags()),
            ("json", Some(path)) if !path.is_empty() => Ok(Self::json(path)),
            ("yaml" | "yml", Some(path)) if !path.is_empty() => Ok(Self::yaml(path)),
            _ => Err(ParseSourceError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptors() {
        assert_eq!("env".parse::<ConfigSource>().unwrap(), ConfigSource::env());
        assert_eq!(
            "json:conf/app.json".parse::<ConfigSource>().unwrap(),
            ConfigSource::json("conf/app.json")
        );
        assert_eq!(
            "YAML:app.yaml".parse::<ConfigSource>().unwrap(),
            ConfigSource::yaml("app.yaml")
        );
        assert_eq!(
            "yml:C:/app.yaml".parse::<ConfigSource>().unwrap(),
            ConfigSource::yaml("C:/app.yaml")
        );
        assert!(matches!(
            "flag".parse::<ConfigSource>().unwrap().kind,
            SourceKind::Flag { .. }
        ));
    }

    #[test]
    fn test_parse_rejects_bad_descriptors() {
        assert!("toml:app.toml".parse::<ConfigSource>().is_err());
        assert!("json".parse::<ConfigSource>().is_err());
        assert!("json:".parse::<ConfigSource>().is_err());
        assert!("env:foo".parse::<ConfigSource>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfigSource::env().to_string(), "env");
        assert_eq!(ConfigSource::json("a.json").to_string(), "json:a.json");
        assert_eq!(
            ConfigSource::flags(["--a=1", "--b"]).to_string(),
            "flag (2 args)"
        );
        assert_eq!(ConfigSource::env().file_path(), None);
        assert_eq!(
            ConfigSource::yaml("b.yaml").file_path(),
            Some(Path::new("b.yaml"))
        );
    }
}
