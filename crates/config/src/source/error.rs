//! Error types for building property sources from files and text.
//!
//! Invariants:
//! - Every variant names the offending document (its path when file-backed).

use std::path::PathBuf;
use thiserror::Error;

use super::format::DocumentFormat;

/// Errors that can occur while reading or parsing a configuration document.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read config file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document {name}: {message}")]
    Parse {
        name: String,
        format: DocumentFormat,
        message: String,
    },

    #[error("Unsupported config file format '{extension}' at {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}
