//! Deploy-time override document loading.
//!
//! Responsibilities:
//! - Read the override file path from a named environment variable.
//! - Check that the path names a readable regular file and parse it.
//!
//! Does NOT handle:
//! - Merging the override with the base source (see resolver.rs).
//!
//! Invariants:
//! - Every failure is logged with `warn!` and yields `None`; nothing here
//!   can fail initialization.
//! - The file is opened, read and closed before this function returns.
//! - The path is taken as an `OsString`; non-UTF-8 paths are used as-is.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::source::DocumentSource;

/// Load the override document named by the environment variable `var`.
pub fn load_external_source(var: &str) -> Option<DocumentSource> {
    let Some(path) = override_path(var) else {
        tracing::warn!(var, "no external config file provided");
        return None;
    };

    match std::fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => {
            tracing::warn!(var, path = %path.display(), "external config path is not a regular file");
            return None;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(var, path = %path.display(), "external config file does not exist");
            return None;
        }
        Err(e) => {
            tracing::warn!(
                var,
                path = %path.display(),
                error = %e,
                "access denied for the external config file"
            );
            return None;
        }
    }

    match DocumentSource::from_path(&path) {
        Ok(source) => {
            tracing::info!(var, path = %path.display(), "loaded external config file");
            Some(source)
        }
        Err(e) => {
            tracing::warn!(
                var,
                path = %path.display(),
                error = %e,
                "ignoring unusable external config file"
            );
            None
        }
    }
}

/// Path named by `var`, or `None` when unset or blank.
///
/// UTF-8 values are trimmed; other values cannot be trimmed and are kept verbatim.
fn override_path(var: &str) -> Option<PathBuf> {
    let raw = std::env::var_os(var)?;
    match raw.to_str() {
        Some(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
        }
        None => {
            tracing::debug!(var, "external config path is not valid UTF-8");
            Some(PathBuf::from(raw))
        }
    }
}
