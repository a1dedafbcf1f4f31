//! Layered typed lookup across the override and base sources.
//!
//! Responsibilities:
//! - Query the layers in precedence order and return the first value found.
//! - Apply one failure policy to every value type.
//!
//! Does NOT handle:
//! - Selecting the environment or loading sources (see `loader/`).
//! - The initialization state machine (see `context.rs`).
//!
//! Invariants:
//! - Precedence is external → active environment → default environment.
//! - The external source is queried with the bare key; base lookups are
//!   scoped as `envConfig.<environment>.<key>`.
//! - A type mismatch in the external source, or in a list read from the base
//!   source, is logged and treated as absent.
//! - A scalar type mismatch in the base source is returned as
//!   `ConfigError::Conversion`.
//! - When the active environment is `"default"` the default scope is queried once.

use std::fmt;

use crate::constants::{DEFAULT_ENVIRONMENT, scoped_path};
use crate::loader::ConfigError;
use crate::source::{Lookup, PropertySource, PropertyValue};

/// The layer that produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    External,
    ActiveEnvironment,
    DefaultEnvironment,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::External => "external",
            Layer::ActiveEnvironment => "active-environment",
            Layer::DefaultEnvironment => "default-environment",
        };
        f.write_str(name)
    }
}

/// A value together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub layer: Layer,
    /// Full path queried in the answering source.
    pub path: String,
}

/// Resolve `key` as a `T` across all layers.
pub(crate) fn resolve<T: PropertyValue>(
    base: &dyn PropertySource,
    external: Option<&dyn PropertySource>,
    environment: &str,
    key: &str,
) -> Result<Option<Resolved<T>>, ConfigError> {
    if let Some(external) = external {
        match T::lookup(external, key) {
            Lookup::Found(value) => return Ok(Some(hit(key, value, Layer::External, key))),
            Lookup::Absent => {}
            Lookup::TypeMismatch { expected, found } => {
                tracing::warn!(
                    key,
                    source = external.name(),
                    expected = %expected,
                    found = %found,
                    "ignoring external value with wrong type"
                );
            }
        }
    }

    for (layer, scope) in base_layers(environment) {
        let path = scoped_path(scope, key);
        match T::lookup(base, &path) {
            Lookup::Found(value) => return Ok(Some(hit(key, value, layer, &path))),
            Lookup::Absent => {}
            Lookup::TypeMismatch { expected, found } if T::KIND.is_scalar() => {
                return Err(ConfigError::Conversion {
                    path,
                    expected,
                    found,
                });
            }
            Lookup::TypeMismatch { expected, found } => {
                tracing::warn!(
                    key,
                    path = %path,
                    expected = %expected,
                    found = %found,
                    "ignoring base value with wrong type"
                );
            }
        }
    }

    tracing::debug!(key, environment, "no value found in any layer");
    Ok(None)
}

fn base_layers(environment: &str) -> impl Iterator<Item = (Layer, &str)> {
    let active = (environment != DEFAULT_ENVIRONMENT)
        .then_some((Layer::ActiveEnvironment, environment));
    active
        .into_iter()
        .chain(std::iter::once((Layer::DefaultEnvironment, DEFAULT_ENVIRONMENT)))
}

fn hit<T>(key: &str, value: T, layer: Layer, path: &str) -> Resolved<T> {
    tracing::debug!(key, layer = %layer, path, "resolved configuration value");
    Resolved {
        value,
        layer,
        path: path.to_string(),
    }
}
