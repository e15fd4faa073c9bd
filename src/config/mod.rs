//! Layered configuration.
//!
//! Sources are added one at a time and evaluated in insertion order:
//! 1. **Environment** - the live process environment, read on every lookup
//! 2. **Flags** - command-line style arguments, parsed once
//! 3. **Files** - JSON or YAML documents, read and decoded once
//!
//! ## Precedence
//! When several sources define the same key, the source added last wins.
//! Only top-level keys are addressable; nested mappings are returned whole.
//!
//! ## Environment arrays
//! An environment value written as `[a,b,c]` is read as the string sequence
//! `a`, `b`, `c`. File sources use their format's native arrays instead.

mod accessors;
mod loader;
mod source;
mod store;

pub use accessors::ElementPolicy;
pub use loader::{Items, load_json, load_yaml, parse_flags, parse_json, parse_yaml};
pub use source::{ConfigSource, FileFormat, ParseSourceError, SourceKind};
pub use store::{Configuration, LoadedSource};
