//! Error types for configuration initialization and lookup.
//!
//! Responsibilities:
//! - Define error variants for every failure surfaced to callers.
//! - Provide conversion from lower-level source errors (`SourceError`).
//!
//! Does NOT handle:
//! - Failures that are downgraded to "absent" (external source lookups, list
//!   lookups, override file loading). Those are logged, not returned.
//!
//! Invariants:
//! - `NotInitialized` is the only error a getter returns before `initialize`.
//! - `Conversion` is only raised for scalar values read from the base source.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::source::{DocumentFormat, SourceError, ValueKind};

/// Errors that can occur while initializing or querying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration is not initialized. Call EnvConfig::initialize before reading values.")]
    NotInitialized,

    #[error("Invalid value at {path}: expected {expected}, found {found}")]
    Conversion {
        path: String,
        expected: ValueKind,
        found: String,
    },

    #[error("Failed to read config file at {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document {name}: {message}")]
    SourceParse {
        name: String,
        format: DocumentFormat,
        message: String,
    },

    #[error("Unsupported config file format '{extension}' at {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl From<SourceError> for ConfigError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::Read { path, source } => ConfigError::SourceRead { path, source },
            SourceError::Parse {
                name,
                format,
                message,
            } => ConfigError::SourceParse {
                name,
                format,
                message,
            },
            SourceError::UnsupportedFormat { path, extension } => {
                ConfigError::UnsupportedFormat { path, extension }
            }
        }
    }
}
