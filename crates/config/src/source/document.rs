//! Property source backed by a parsed document tree.
//!
//! Responsibilities:
//! - Load JSON, TOML and YAML documents from files or text.
//! - Resolve dotted paths against the tree.
//! - Convert stored values into the four supported value types.
//!
//! Invariants:
//! - A literal key containing dots (e.g. `"envConfig.env"`) is matched before
//!   descending into nested objects segment by segment.
//! - `null` is treated as absent.
//! - Strings, numbers and booleans all render as strings for scalar reads, so
//!   `"3"` and `3` both read as the integer 3.
//! - Any scalar reads as a boolean: only `true` (any case) is true. Integers
//!   are 32-bit; text outside that range is a type mismatch.
//! - Objects and lists read as scalars, and non-lists read as lists, are type
//!   mismatches, never absent.

use serde_json::Value;
use std::path::Path;

use super::error::SourceError;
use super::format::DocumentFormat;
use super::{Lookup, PropertySource, ValueKind};

const INLINE_NAME: &str = "inline";

/// A `PropertySource` over an in-memory document tree.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    name: String,
    root: Value,
}

impl DocumentSource {
    /// Wrap an already-parsed document tree.
    pub fn from_value(root: Value) -> Self {
        Self {
            name: INLINE_NAME.to_string(),
            root,
        }
    }

    /// Parse a document from text in the given format.
    pub fn from_str(text: &str, format: DocumentFormat) -> Result<Self, SourceError> {
        let root = format.parse(text).map_err(|message| SourceError::Parse {
            name: INLINE_NAME.to_string(),
            format,
            message,
        })?;
        Ok(Self::from_value(root))
    }

    /// Read and parse a document file, detecting its format from the extension.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let format = DocumentFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root = format.parse(&text).map_err(|message| SourceError::Parse {
            name: path.display().to_string(),
            format,
            message,
        })?;

        Ok(Self {
            name: path.display().to_string(),
            root,
        })
    }

    fn node(&self, path: &str) -> Option<&Value> {
        find(&self.root, path).filter(|node| !node.is_null())
    }

    fn scalar<T>(
        &self,
        path: &str,
        expected: ValueKind,
        convert: impl FnOnce(&str) -> Option<T>,
    ) -> Lookup<T> {
        let Some(node) = self.node(path) else {
            return Lookup::Absent;
        };

        match render_scalar(node).as_deref().and_then(convert) {
            Some(value) => Lookup::Found(value),
            None => Lookup::TypeMismatch {
                expected,
                found: describe(node),
            },
        }
    }
}

impl PropertySource for DocumentSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_bool(&self, path: &str) -> Lookup<bool> {
        self.scalar(path, ValueKind::Boolean, parse_bool)
    }

    fn get_int(&self, path: &str) -> Lookup<i32> {
        self.scalar(path, ValueKind::Integer, |text| text.trim().parse().ok())
    }

    fn get_string(&self, path: &str) -> Lookup<String> {
        self.scalar(path, ValueKind::String, |text| Some(text.to_string()))
    }

    fn get_string_list(&self, path: &str) -> Lookup<Vec<String>> {
        let Some(node) = self.node(path) else {
            return Lookup::Absent;
        };

        let items = node
            .as_array()
            .and_then(|items| items.iter().map(render_scalar).collect::<Option<Vec<_>>>());

        match items {
            Some(items) => Lookup::Found(items),
            None => Lookup::TypeMismatch {
                expected: ValueKind::StringList,
                found: describe(node),
            },
        }
    }
}

/// Resolve `path` below `node`, preferring the longest literal key at each level.
fn find<'a>(node: &'a Value, path: &str) -> Option<&'a Value> {
    let map = node.as_object()?;

    if let Some(value) = map.get(path) {
        return Some(value);
    }

    for (idx, _) in path.match_indices('.').rev() {
        if let Some(child) = map.get(&path[..idx])
            && let Some(found) = find(child, &path[idx + 1..])
        {
            return Some(found);
        }
    }

    None
}

fn render_scalar(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn describe(node: &Value) -> String {
    match node {
        Value::Array(_) => "list".to_string(),
        Value::Object(_) => "object".to_string(),
        Value::Null => "null".to_string(),
        scalar => scalar.to_string(),
    }
}

/// Only a case-insensitive `true` reads as true; every other scalar is false.
fn parse_bool(text: &str) -> Option<bool> {
    Some(text.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample() -> DocumentSource {
        DocumentSource::from_value(json!({
            "envConfig": {
                "env": "staging",
                "staging": {
                    "retries": "3",
                    "timeout": 30,
                    "verbose": "yes",
                    "hosts": ["a.example.com", "b.example.com"],
                    "ports": [8080, 8081],
                    "db": { "pool": { "size": 8 } },
                    "empty": null
                }
            },
            "feature.flags": { "beta": true }
        }))
    }

    #[test]
    fn test_nested_path_lookup() {
        let source = sample();
        assert_eq!(
            source.get_string("envConfig.env"),
            Lookup::Found("staging".to_string())
        );
        assert_eq!(source.get_int("envConfig.staging.db.pool.size"), Lookup::Found(8));
    }

    #[test]
    fn test_literal_dotted_key_lookup() {
        let source = sample();
        assert_eq!(source.get_bool("feature.flags.beta"), Lookup::Found(true));

        let flat = DocumentSource::from_value(json!({ "envConfig.env": "prod" }));
        assert_eq!(
            flat.get_string("envConfig.env"),
            Lookup::Found("prod".to_string())
        );
    }

    #[test]
    fn test_strings_and_numbers_convert_to_integers() {
        let source = sample();
        assert_eq!(source.get_int("envConfig.staging.retries"), Lookup::Found(3));
        assert_eq!(source.get_int("envConfig.staging.timeout"), Lookup::Found(30));
        assert_eq!(
            source.get_string("envConfig.staging.timeout"),
            Lookup::Found("30".to_string())
        );
    }

    #[test]
    fn test_only_true_reads_as_true() {
        let source = sample();
        assert_eq!(source.get_bool("feature.flags.beta"), Lookup::Found(true));
        assert_eq!(source.get_bool("envConfig.staging.verbose"), Lookup::Found(false));
        assert_eq!(source.get_bool("envConfig.env"), Lookup::Found(false));
        assert_eq!(source.get_bool("envConfig.staging.timeout"), Lookup::Found(false));

        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("on"), Some(false));
        assert_eq!(parse_bool("maybe"), Some(false));
        assert_eq!(parse_bool(""), Some(false));
    }

    #[test]
    fn test_bool_read_of_structured_value_is_mismatch() {
        let source = sample();
        assert!(matches!(
            source.get_bool("envConfig.staging.db"),
            Lookup::TypeMismatch {
                expected: ValueKind::Boolean,
                ..
            }
        ));
    }

    #[test]
    fn test_integers_are_32_bit() {
        let source = DocumentSource::from_value(json!({
            "max": "2147483647",
            "min": -2147483648i64,
            "big": "3000000000",
            "bigger": 3000000000i64
        }));
        assert_eq!(source.get_int("max"), Lookup::Found(i32::MAX));
        assert_eq!(source.get_int("min"), Lookup::Found(i32::MIN));
        assert_eq!(
            source.get_int("big"),
            Lookup::TypeMismatch {
                expected: ValueKind::Integer,
                found: "\"3000000000\"".to_string(),
            }
        );
        assert_eq!(
            source.get_int("bigger"),
            Lookup::TypeMismatch {
                expected: ValueKind::Integer,
                found: "3000000000".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_and_null_paths_are_absent() {
        let source = sample();
        assert_eq!(source.get_string("envConfig.staging.missing"), Lookup::Absent);
        assert_eq!(source.get_string("envConfig.staging.empty"), Lookup::Absent);
        assert_eq!(source.get_int("envConfig.env.deeper"), Lookup::Absent);
        assert_eq!(source.get_string_list("nope"), Lookup::Absent);
    }

    #[test]
    fn test_wrong_type_is_mismatch_not_absent() {
        let source = sample();
        assert_eq!(
            source.get_int("envConfig.env"),
            Lookup::TypeMismatch {
                expected: ValueKind::Integer,
                found: "\"staging\"".to_string(),
            }
        );
        assert_eq!(
            source.get_string("envConfig.staging.db"),
            Lookup::TypeMismatch {
                expected: ValueKind::String,
                found: "object".to_string(),
            }
        );
        assert!(matches!(
            source.get_string_list("envConfig.staging.retries"),
            Lookup::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_lists_render_scalar_items() {
        let source = sample();
        assert_eq!(
            source.get_string_list("envConfig.staging.hosts"),
            Lookup::Found(vec![
                "a.example.com".to_string(),
                "b.example.com".to_string()
            ])
        );
        assert_eq!(
            source.get_string_list("envConfig.staging.ports"),
            Lookup::Found(vec!["8080".to_string(), "8081".to_string()])
        );
    }

    #[test]
    fn test_from_path_reads_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("override.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "retries: 7\nhosts:\n  - x\n  - y").unwrap();

        let source = DocumentSource::from_path(&path).unwrap();
        assert_eq!(source.name(), path.display().to_string());
        assert_eq!(source.get_int("retries"), Lookup::Found(7));
        assert_eq!(
            source.get_string_list("hosts"),
            Lookup::Found(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_from_path_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = DocumentSource::from_path(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(SourceError::Read { .. })));
    }

    #[test]
    fn test_from_str_parse_error() {
        let result = DocumentSource::from_str("retries = ", DocumentFormat::Toml);
        assert!(matches!(
            result,
            Err(SourceError::Parse {
                format: DocumentFormat::Toml,
                ..
            })
        ));
    }
}
