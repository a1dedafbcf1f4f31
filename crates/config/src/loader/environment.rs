//! Active environment selection.
//!
//! Invariants:
//! - The environment is read from `envConfig.env` in the base source only.
//! - Absent, blank or wrong-typed selectors all select `"default"`.

use crate::constants::{DEFAULT_ENVIRONMENT, environment_selector_path};
use crate::source::{Lookup, PropertySource};

/// Determine the active environment name from the base source.
pub fn resolve_environment(base: &dyn PropertySource) -> String {
    let path = environment_selector_path();

    let environment = match base.get_string(&path) {
        Lookup::Found(name) if !name.trim().is_empty() => name.trim().to_string(),
        Lookup::Found(_) | Lookup::Absent => DEFAULT_ENVIRONMENT.to_string(),
        Lookup::TypeMismatch { found, .. } => {
            tracing::warn!(
                path = %path,
                found = %found,
                source = base.name(),
                "environment selector is not a string, using default environment"
            );
            DEFAULT_ENVIRONMENT.to_string()
        }
    };

    tracing::info!(environment = %environment, "using configuration environment");
    environment
}
