//! Integration tests for environment-scoped configuration resolution.
//!
//! These tests drive the public API end to end: base documents loaded from
//! files, overrides supplied through `EC_CONFIGFILE`, and the typed getters.

use env_config::constants::OVERRIDE_FILE_VAR;
use env_config::{
    ConfigContext, ConfigError, DocumentFormat, DocumentSource, EnvConfig, Layer, env_var_or_none,
};
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{contents}").unwrap();
    path
}

fn staging_base(retries_in_staging: bool) -> DocumentSource {
    let staging = if retries_in_staging {
        r#"{ "retries": "3" }"#
    } else {
        "{}"
    };
    let text = format!(
        r#"{{ "envConfig": {{ "env": "staging", "staging": {staging}, "default": {{ "retries": "1" }} }} }}"#
    );
    DocumentSource::from_str(&text, DocumentFormat::Json).unwrap()
}

/// Initialize with the default override variable pointing nowhere.
fn initialize_without_override(base: DocumentSource) -> EnvConfig {
    temp_env::with_var_unset(OVERRIDE_FILE_VAR, || {
        let mut config = EnvConfig::new();
        config.initialize(base);
        config
    })
}

/// Active-environment value wins; removing it exposes the default value.
#[test]
#[serial]
fn test_staging_retries_scenario() {
    let config = initialize_without_override(staging_base(true));
    assert_eq!(config.get_int("retries").unwrap(), Some(3));

    let config = initialize_without_override(staging_base(false));
    assert_eq!(config.get_int("retries").unwrap(), Some(1));
}

/// An override document's bare key beats every base value.
#[test]
#[serial]
fn test_override_retries_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "override.conf", r#"{ "retries": "7" }"#);

    temp_env::with_var(OVERRIDE_FILE_VAR, Some(path.as_os_str()), || {
        let mut config = EnvConfig::new();
        config.initialize(staging_base(true));
        assert_eq!(config.get_int("retries").unwrap(), Some(7));
    });
}

/// Without a selector every environment-scoped lookup is a default lookup.
#[test]
#[serial]
fn test_missing_selector_degenerates_to_default() {
    let base = DocumentSource::from_str(
        "[envConfig.default]\nname = \"svc\"\nport = 8080\n",
        DocumentFormat::Toml,
    )
    .unwrap();
    let config = initialize_without_override(base);

    assert_eq!(config.active_environment().unwrap(), "default");
    assert_eq!(config.get_string("name").unwrap(), Some("svc".to_string()));
    assert_eq!(config.get_int("port").unwrap(), Some(8080));

    let resolved = config.resolve::<i32>("port").unwrap().unwrap();
    assert_eq!(resolved.layer, Layer::DefaultEnvironment);
}

/// Absent keys yield `None` from every getter and the default from `_or` getters.
#[test]
#[serial]
fn test_absent_keys_everywhere() {
    let config = initialize_without_override(staging_base(true));

    assert_eq!(config.get_bool("absent").unwrap(), None);
    assert_eq!(config.get_int("absent").unwrap(), None);
    assert_eq!(config.get_string("absent").unwrap(), None);
    assert_eq!(config.get_list("absent").unwrap(), None);
    assert!(!config.get_bool_or("absent", false).unwrap());
    assert_eq!(config.get_int_or("absent", -1).unwrap(), -1);
    assert_eq!(config.get_string_or("absent", "x").unwrap(), "x");
    assert!(config.get_list_or("absent", Vec::new()).unwrap().is_empty());
}

/// A base document and override loaded from YAML files on disk.
#[test]
#[serial]
fn test_base_and_override_from_files() {
    let temp_dir = TempDir::new().unwrap();
    let base_path = write_file(
        temp_dir.path(),
        "application.yaml",
        "envConfig:\n  env: prod\n  prod:\n    hosts: [p1, p2]\n    debug: off\n  default:\n    hosts: [d1]\n    debug: on\n    region: eu\n",
    );
    let override_path = write_file(temp_dir.path(), "override.yml", "region: us\n");

    temp_env::with_var(OVERRIDE_FILE_VAR, Some(override_path.as_os_str()), || {
        let base = DocumentSource::from_path(&base_path).unwrap();
        let mut config = EnvConfig::new();
        config.initialize(base);

        assert_eq!(config.active_environment().unwrap(), "prod");
        assert_eq!(
            config.get_list("hosts").unwrap(),
            Some(vec!["p1".to_string(), "p2".to_string()])
        );
        assert_eq!(config.get_bool("debug").unwrap(), Some(false));
        assert_eq!(config.get_string("region").unwrap(), Some("us".to_string()));
    });
}

/// A context built once can be handed to consumers by reference.
#[test]
fn test_context_injection() {
    fn worker_count(config: &ConfigContext) -> Result<i32, ConfigError> {
        config.get_int_or("workers", 2)
    }

    let context = ConfigContext::from_sources(staging_base(true), None);
    assert_eq!(worker_count(&context).unwrap(), 2);
}

/// Test that env_var_or_none is exported and works correctly
#[test]
#[serial]
fn test_env_var_or_none_exported() {
    temp_env::with_var(OVERRIDE_FILE_VAR, Some(" /tmp/override.conf "), || {
        assert_eq!(
            env_var_or_none(OVERRIDE_FILE_VAR),
            Some("/tmp/override.conf".to_string())
        );
    });
}
