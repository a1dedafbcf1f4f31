//! Centralized constants for environment-scoped configuration lookups.
//!
//! These names define the document layout every base source is expected to
//! follow and the process environment the override loader consults.

// =============================================================================
// Document Layout
// =============================================================================

/// Root namespace under which all environment-scoped properties live.
pub const ROOT_NODE: &str = "envConfig";

/// Child of [`ROOT_NODE`] holding the name of the active environment.
pub const ENVIRONMENT_NODE: &str = "env";

/// Environment used when none is selected, and the final fallback scope.
pub const DEFAULT_ENVIRONMENT: &str = "default";

// =============================================================================
// Process Environment
// =============================================================================

/// Environment variable holding the path of the optional override document.
pub const OVERRIDE_FILE_VAR: &str = "EC_CONFIGFILE";

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Path Helpers
// =============================================================================

/// Path of the environment selector, `envConfig.env`.
pub fn environment_selector_path() -> String {
    format!("{ROOT_NODE}.{ENVIRONMENT_NODE}")
}

/// Path of `key` scoped to `environment`, `envConfig.<environment>.<key>`.
pub fn scoped_path(environment: &str, key: &str) -> String {
    format!("{ROOT_NODE}.{environment}.{key}")
}
