//! Source loaders.
//!
//! Each loader turns one source into a flat, string-keyed snapshot of
//! [`Value`]s. JSON numbers always decode as floats while YAML integers stay
//! integers; the array accessors depend on that difference.

use crate::error::LoadError;
use crate::value::{Value, yaml_key_to_string};
use std::collections::HashMap;
use std::path::Path;

/// A snapshot of a source's top-level keys.
pub type Items = HashMap<String, Value>;

/// Read and decode a JSON file whose root is an object.
pub fn load_json(path: &Path) -> Result<Items, LoadError> {
    let bytes = read_bytes(path)?;
    parse_json(&bytes, path)
}

/// Read and decode a YAML file whose root is a mapping.
pub fn load_yaml(path: &Path) -> Result<Items, LoadError> {
    let bytes = read_bytes(path)?;
    parse_yaml(&bytes, path)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode JSON bytes. `path` is only used for error reporting.
pub fn parse_json(bytes: &[u8], path: &Path) -> Result<Items, LoadError> {
    let doc: serde_json::Value = serde_json::from_slice(bytes).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match doc {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()),
        serde_json::Value::Null => Ok(Items::new()),
        other => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
            found: Value::from(other).kind(),
        }),
    }
}

/// Decode YAML bytes. `path` is only used for error reporting.
pub fn parse_yaml(bytes: &[u8], path: &Path) -> Result<Items, LoadError> {
    // An empty document is a valid, empty configuration.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Items::new());
    }

    let doc: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    match doc {
        serde_yaml::Value::Mapping(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (yaml_key_to_string(key), Value::from(value)))
            .collect()),
        serde_yaml::Value::Null => Ok(Items::new()),
        other => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
            found: Value::from(other).kind(),
        }),
    }
}

/// Parse command-line style arguments into string values.
///
/// Accepts `--key=value`, `-key=value`, `--key value` and bare `--key`
/// (which maps to `"true"`). A literal `--` ends parsing; positional
/// arguments are ignored. Later occurrences of a key win.
pub fn parse_flags<S: AsRef<str>>(args: &[S]) -> Items {
    let mut items = Items::new();
    let mut iter = args.iter().map(|arg| arg.as_ref()).peekable();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }
        let Some(name) = strip_dashes(arg) else {
            continue;
        };

        if let Some((key, value)) = name.split_once('=') {
            if !key.is_empty() {
                items.insert(key.to_string(), Value::from(value));
            }
            continue;
        }

        let value = match iter.peek() {
            Some(next) if strip_dashes(next).is_none() && *next != "--" => {
                let value = next.to_string();
                iter.next();
                value
            }
            _ => "true".to_string(),
        };
        items.insert(name.to_string(), Value::from(value));
    }

    items
}

/// Strip one or two leading dashes. Returns `None` for positional arguments
/// and for a lone dash.
fn strip_dashes(arg: &str) -> Option<&str> {
    let name = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;
    if name.is_empty() || name.starts_with('-') {
        None
    } else {
        Some(name)
    }
}
