//! Configuration context and its initialization lifecycle.
//!
//! Responsibilities:
//! - Hold the active environment, the base source and the optional override.
//! - Model the `Uninitialized` → `Ready` transition explicitly.
//! - Expose the typed getters, with and without caller-supplied defaults.
//!
//! Does NOT handle:
//! - Lookup precedence (see `resolver.rs`).
//! - Reading override files (see `loader/external.rs`).
//!
//! Invariants / Assumptions:
//! - `initialize` replaces the environment and both sources; nothing carries
//!   over from a previous initialization.
//! - The override loader runs exactly once per `initialize` call.
//! - Getters on an uninitialized `EnvConfig` return `ConfigError::NotInitialized`.
//! - A `ConfigContext` is immutable once built and can be shared across threads.

use crate::constants::OVERRIDE_FILE_VAR;
use crate::loader::{ConfigError, load_dotenv, load_external_source, resolve_environment};
use crate::resolver::{self, Resolved};
use crate::source::{DocumentSource, PropertySource, PropertyValue};
use std::path::Path;

/// Resolved configuration: the ready state of an [`EnvConfig`].
///
/// Build one at startup and pass it by reference to the code that needs it.
#[derive(Debug)]
pub struct ConfigContext {
    active_environment: String,
    base: Box<dyn PropertySource>,
    external: Option<Box<dyn PropertySource>>,
}

impl ConfigContext {
    /// Build a context from explicit sources without consulting the process
    /// environment. The active environment is still read from `base`.
    pub fn from_sources(
        base: impl PropertySource + 'static,
        external: Option<Box<dyn PropertySource>>,
    ) -> Self {
        let base: Box<dyn PropertySource> = Box::new(base);
        let active_environment = resolve_environment(base.as_ref());
        Self {
            active_environment,
            base,
            external,
        }
    }

    /// Name of the environment selected at initialization.
    pub fn active_environment(&self) -> &str {
        &self.active_environment
    }

    pub fn has_external_source(&self) -> bool {
        self.external.is_some()
    }

    pub fn base_source(&self) -> &dyn PropertySource {
        self.base.as_ref()
    }

    pub fn external_source(&self) -> Option<&dyn PropertySource> {
        self.external.as_deref()
    }

    /// Resolve `key` and report which layer answered.
    pub fn resolve<T: PropertyValue>(&self, key: &str) -> Result<Option<Resolved<T>>, ConfigError> {
        resolver::resolve(
            self.base.as_ref(),
            self.external.as_deref(),
            &self.active_environment,
            key,
        )
    }

    pub fn get<T: PropertyValue>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        Ok(self.resolve::<T>(key)?.map(|resolved| resolved.value))
    }

    pub fn get_or<T: PropertyValue>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.get(key)
    }

    pub fn get_int(&self, key: &str) -> Result<Option<i32>, ConfigError> {
        self.get(key)
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.get(key)
    }

    pub fn get_list(&self, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        self.get(key)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        self.get_or(key, default)
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        self.get_or(key, default)
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(self.get_string(key)?.unwrap_or_else(|| default.to_string()))
    }

    pub fn get_list_or(&self, key: &str, default: Vec<String>) -> Result<Vec<String>, ConfigError> {
        self.get_or(key, default)
    }
}

#[derive(Debug)]
enum ContextState {
    Uninitialized,
    Ready(ConfigContext),
}

/// Environment-aware configuration with an explicit initialization step.
///
/// ```no_run
/// use env_config::EnvConfig;
/// use std::path::Path;
///
/// let mut config = EnvConfig::new();
/// let retries = config
///     .initialize_from_path(Path::new("application.json"))?
///     .get_int_or("retries", 1)?;
/// # Ok::<(), env_config::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct EnvConfig {
    override_var: String,
    state: ContextState,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfig {
    /// Create an uninitialized configuration reading overrides from `EC_CONFIGFILE`.
    pub fn new() -> Self {
        Self {
            override_var: OVERRIDE_FILE_VAR.to_string(),
            state: ContextState::Uninitialized,
        }
    }

    /// Read the override file path from `var` instead of `EC_CONFIGFILE`.
    pub fn with_override_var(mut self, var: impl Into<String>) -> Self {
        self.override_var = var.into();
        self
    }

    /// Load a `.env` file before initialization so it can supply the override path.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1" the file is not loaded.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        load_dotenv()?;
        Ok(self)
    }

    /// Name of the environment variable consulted for the override file.
    pub fn override_var(&self) -> &str {
        &self.override_var
    }

    /// Initialize from `base`, replacing any previous state.
    ///
    /// Selects the active environment and attempts to load the override
    /// document. Override failures are logged and never fail initialization.
    pub fn initialize(&mut self, base: impl PropertySource + 'static) -> &mut Self {
        let external = load_external_source(&self.override_var)
            .map(|source| Box::new(source) as Box<dyn PropertySource>);
        let context = ConfigContext::from_sources(base, external);

        tracing::info!(
            environment = context.active_environment(),
            base = context.base_source().name(),
            external = context.has_external_source(),
            "configuration initialized"
        );

        self.state = ContextState::Ready(context);
        self
    }

    /// Load the base document from `path` and initialize from it.
    ///
    /// Unlike the override file, a base document that cannot be read or parsed
    /// is an error, and the previous state is left untouched.
    pub fn initialize_from_path(&mut self, path: &Path) -> Result<&mut Self, ConfigError> {
        let base = DocumentSource::from_path(path)?;
        Ok(self.initialize(base))
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, ContextState::Ready(_))
    }

    /// The ready context, or `NotInitialized`.
    pub fn context(&self) -> Result<&ConfigContext, ConfigError> {
        match &self.state {
            ContextState::Ready(context) => Ok(context),
            ContextState::Uninitialized => {
                tracing::warn!("configuration accessed before initialization");
                Err(ConfigError::NotInitialized)
            }
        }
    }

    /// Consume the handle, keeping only the ready context.
    pub fn into_context(self) -> Result<ConfigContext, ConfigError> {
        match self.state {
            ContextState::Ready(context) => Ok(context),
            ContextState::Uninitialized => Err(ConfigError::NotInitialized),
        }
    }

    pub fn active_environment(&self) -> Result<&str, ConfigError> {
        Ok(self.context()?.active_environment())
    }

    pub fn resolve<T: PropertyValue>(&self, key: &str) -> Result<Option<Resolved<T>>, ConfigError> {
        self.context()?.resolve(key)
    }

    pub fn get<T: PropertyValue>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.context()?.get(key)
    }

    pub fn get_or<T: PropertyValue>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        self.context()?.get_or(key, default)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.context()?.get_bool(key)
    }

    pub fn get_int(&self, key: &str) -> Result<Option<i32>, ConfigError> {
        self.context()?.get_int(key)
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.context()?.get_string(key)
    }

    pub fn get_list(&self, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        self.context()?.get_list(key)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        self.context()?.get_bool_or(key, default)
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        self.context()?.get_int_or(key, default)
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        self.context()?.get_string_or(key, default)
    }

    pub fn get_list_or(&self, key: &str, default: Vec<String>) -> Result<Vec<String>, ConfigError> {
        self.context()?.get_list_or(key, default)
    }
}
