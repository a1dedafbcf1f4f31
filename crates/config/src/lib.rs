//! Environment-scoped configuration resolution.
//!
//! This crate resolves typed configuration values from a base document with
//! per-environment sections, optionally overridden by an external document
//! whose path is supplied through an environment variable.

pub mod constants;
mod context;
mod loader;
mod resolver;
pub mod source;

pub use context::{ConfigContext, EnvConfig};
pub use loader::{
    ConfigError, env_var_or_none, load_dotenv, load_external_source, resolve_environment,
};
pub use resolver::{Layer, Resolved};
pub use source::{
    DocumentFormat, DocumentSource, Lookup, PropertySource, PropertyValue, SourceError, ValueKind,
};

