//! Document format detection and parsing.
//!
//! Responsibilities:
//! - Map file extensions to a supported document format.
//! - Parse document text into a `serde_json::Value` tree.
//!
//! Does NOT handle:
//! - HOCON-specific syntax (substitutions, unquoted keys, includes). `.conf`
//!   and `.hocon` files are accepted only in their JSON subset.
//! - Path navigation (see `document.rs`).

use serde_json::Value;
use std::fmt;
use std::path::Path;

use super::error::SourceError;

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format of a file from its extension.
    ///
    /// Files without an extension are treated as JSON.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let Some(extension) = path.extension().and_then(|s| s.to_str()) else {
            return Ok(DocumentFormat::Json);
        };

        match extension.to_lowercase().as_str() {
            "json" | "conf" | "hocon" => Ok(DocumentFormat::Json),
            "toml" => Ok(DocumentFormat::Toml),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => Err(SourceError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            }),
        }
    }

    /// Parse `text` into a document tree.
    ///
    /// Returns the parser's error message on failure.
    pub(crate) fn parse(self, text: &str) -> Result<Value, String> {
        match self {
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => {
                // A null YAML document carries no properties.
                let value: Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
                Ok(if value.is_null() {
                    Value::Object(Default::default())
                } else {
                    value
                })
            }
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Toml => "TOML",
            DocumentFormat::Yaml => "YAML",
        };
        f.write_str(name)
    }
}
