//! Initialization-time loading: environment selection and override documents.
//!
//! Responsibilities:
//! - Select the active environment from the base source.
//! - Load the optional override document named by an environment variable.
//! - Read process environment variables and optional `.env` files.
//! - Define the crate's `ConfigError`.
//!
//! Does NOT handle:
//! - Per-key lookups after initialization (see `resolver.rs`).
//!
//! Invariants / Assumptions:
//! - Everything here runs once per `EnvConfig::initialize` call.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod env;
mod environment;
mod error;
mod external;

pub use env::{env_var_or_none, load_dotenv};
pub use environment::resolve_environment;
pub use error::ConfigError;
pub use external::load_external_source;

#[cfg(test)]
mod tests;
