//! The layered store.
//!
//! A [`Configuration`] is an append-only list of loaded sources. Lookups scan
//! every source in insertion order and keep the last hit, so sources added
//! later override earlier ones.

use super::loader::{Items, load_json, load_yaml, parse_flags};
use super::source::{ConfigSource, FileFormat, SourceKind};
use crate::error::LoadError;
use crate::value::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// How a loaded source answers lookups.
#[derive(Debug)]
enum Provider {
    /// Values captured when the source was added. `None` if loading failed.
    Snapshot(Option<Items>),
    /// The live process environment.
    LiveEnv,
}

impl Provider {
    fn snapshot_at(items: &Option<Items>, key: &str) -> Option<Value> {
        items.as_ref()?.get(key).cloned()
    }

    /// Read `key` from the environment. Bracketed values such as `[a,b,c]`
    /// are split on commas into a string sequence.
    fn live_at(key: &str) -> Option<Value> {
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        let raw = std::env::var_os(key)?.to_string_lossy().into_owned();
        let value = match raw
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            Some(inner) => Value::StringSeq(inner.split(',').map(str::to_string).collect()),
            None => Value::String(raw),
        };
        Some(value)
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        match self {
            Provider::Snapshot(items) => Self::snapshot_at(items, key),
            Provider::LiveEnv => Self::live_at(key),
        }
    }
}

/// A source after it has been added to a [`Configuration`].
#[derive(Debug)]
pub struct LoadedSource {
    source: ConfigSource,
    provider: Provider,
    error: Option<LoadError>,
}

impl LoadedSource {
    fn load(source: ConfigSource) -> Self {
        let (provider, error) = match &source.kind {
            SourceKind::Env => (Provider::LiveEnv, None),
            SourceKind::Flag { args } => {
                let items = parse_flags(args.as_slice());
                (Provider::Snapshot(Some(items)), None)
            }
            SourceKind::File { format, path } => {
                let result = match format {
                    FileFormat::Json => load_json(path),
                    FileFormat::Yaml => load_yaml(path),
                };
                match result {
                    Ok(items) => (Provider::Snapshot(Some(items)), None),
                    Err(e) => (Provider::Snapshot(None), Some(e)),
                }
            }
        };
        Self {
            source,
            provider,
            error,
        }
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// The error recorded while loading, if any.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// Number of snapshotted keys. `None` for the live environment.
    pub fn key_count(&self) -> Option<usize> {
        match &self.provider {
            Provider::Snapshot(items) => Some(items.as_ref().map_or(0, |items| items.len())),
            Provider::LiveEnv => None,
        }
    }

    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.provider.lookup(key)
    }
}

/// An ordered collection of configuration sources.
///
/// `add_config_source` returns a new configuration and leaves the receiver
/// untouched; loaded sources are shared, so clones are cheap.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    sources: Vec<Arc<LoadedSource>>,
    has_error: bool,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `source` and append it after the existing sources.
    ///
    /// Load failures are recorded on the source and set the sticky error flag;
    /// the failed source is still appended but contributes no keys.
    pub fn add_config_source(&self, source: ConfigSource) -> Configuration {
        let loaded = LoadedSource::load(source);
        let mut next = self.clone();

        if let Some(ref err) = loaded.error {
            warn!(source = %loaded.source, error = %err, "Failed to load config source");
            next.has_error = true;
        } else {
            debug!(
                source = %loaded.source,
                keys = ?loaded.key_count(),
                "Added config source"
            );
        }

        next.sources.push(Arc::new(loaded));
        next
    }

    /// Resolve `key` across all sources. The last source containing it wins.
    pub fn find_key(&self, key: &str) -> Option<Value> {
        let mut found = None;
        for (index, source) in self.sources.iter().enumerate() {
            if let Some(value) = source.lookup(key) {
                trace!(key, index, source = %source.source, "Key found in source");
                found = Some(value);
            }
        }
        found
    }

    /// True once any added source has failed to load.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The loaded sources in insertion order.
    pub fn sources(&self) -> impl Iterator<Item = &LoadedSource> {
        self.sources.iter().map(|source| source.as_ref())
    }
}
