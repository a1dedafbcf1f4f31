//! Property sources: queryable hierarchical documents.
//!
//! Responsibilities:
//! - Define the `PropertySource` capability the resolver queries.
//! - Define the structured `Lookup` outcome shared by every typed lookup.
//! - Provide `DocumentSource`, the adapter over parsed JSON/TOML/YAML documents.
//!
//! Does NOT handle:
//! - Layer precedence or environment scoping (see `resolver.rs`).
//! - Deciding whether a failed lookup is fatal (see `resolver.rs`).
//!
//! Invariants:
//! - A source never panics on lookup; every outcome is a `Lookup` variant.
//! - `Absent` and `TypeMismatch` are distinct outcomes.

mod document;
mod error;
mod format;

use std::fmt;

pub use document::DocumentSource;
pub use error::SourceError;
pub use format::DocumentFormat;

/// The value types a property source can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Integer,
    String,
    StringList,
}

impl ValueKind {
    /// Whether the value is produced by converting a single scalar.
    pub fn is_scalar(self) -> bool {
        !matches!(self, ValueKind::StringList)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::StringList => "list of strings",
        };
        f.write_str(name)
    }
}

/// Outcome of a single typed lookup against one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The path exists and holds a value of the requested type.
    Found(T),
    /// Nothing is stored at the path.
    Absent,
    /// The path exists but its value cannot be read as `expected`.
    TypeMismatch { expected: ValueKind, found: String },
}

impl<T> Lookup<T> {
    /// Convert into an `Option`, treating a type mismatch as absent.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent | Lookup::TypeMismatch { .. } => None,
        }
    }
}

/// A hierarchical document queryable by dotted path.
///
/// Implementations only need to answer the four typed lookups; parsing and
/// I/O stay behind this boundary.
pub trait PropertySource: fmt::Debug + Send + Sync {
    /// Human-readable name used in log output.
    fn name(&self) -> &str;

    fn get_bool(&self, path: &str) -> Lookup<bool>;

    fn get_int(&self, path: &str) -> Lookup<i32>;

    fn get_string(&self, path: &str) -> Lookup<String>;

    fn get_string_list(&self, path: &str) -> Lookup<Vec<String>>;
}

impl<S: PropertySource + ?Sized> PropertySource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_bool(&self, path: &str) -> Lookup<bool> {
        (**self).get_bool(path)
    }

    fn get_int(&self, path: &str) -> Lookup<i32> {
        (**self).get_int(path)
    }

    fn get_string(&self, path: &str) -> Lookup<String> {
        (**self).get_string(path)
    }

    fn get_string_list(&self, path: &str) -> Lookup<Vec<String>> {
        (**self).get_string_list(path)
    }
}

/// A value type the layered resolver can look up.
///
/// Dispatches to the matching `PropertySource` capability so one generic
/// lookup routine serves every typed getter.
pub trait PropertyValue: Sized {
    const KIND: ValueKind;

    fn lookup(source: &dyn PropertySource, path: &str) -> Lookup<Self>;
}

impl PropertyValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn lookup(source: &dyn PropertySource, path: &str) -> Lookup<Self> {
        source.get_bool(path)
    }
}

impl PropertyValue for i32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn lookup(source: &dyn PropertySource, path: &str) -> Lookup<Self> {
        source.get_int(path)
    }
}

impl PropertyValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn lookup(source: &dyn PropertySource, path: &str) -> Lookup<Self> {
        source.get_string(path)
    }
}

impl PropertyValue for Vec<String> {
    const KIND: ValueKind = ValueKind::StringList;

    fn lookup(source: &dyn PropertySource, path: &str) -> Lookup<Self> {
        source.get_string_list(path)
    }
}
