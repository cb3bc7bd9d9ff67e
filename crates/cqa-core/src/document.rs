//! # Document Loading
//!
//! Product records, rule configurations and schemas are authored as JSON or
//! YAML. Everything downstream works on `serde_json::Value`, so YAML input
//! is converted to the equivalent JSON value tree on load.

use std::path::Path;

use serde_json::Value;

use crate::error::DocumentError;

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text (JSON-compatible subset).
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension. Anything other than
    /// `.yaml`/`.yml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Read a document from disk, choosing the parser by file extension.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read, and
/// [`DocumentError::Parse`] / [`DocumentError::Conversion`] if its content
/// is not a valid document.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&content, DocumentFormat::from_path(path), &path.display().to_string())
}

/// Parse document text in the given format. `origin` names the document in
/// error messages.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| DocumentError::Parse {
                path: origin.to_string(),
                format: format.name(),
                reason: e.to_string(),
            })
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| DocumentError::Parse {
                    path: origin.to_string(),
                    format: format.name(),
                    reason: e.to_string(),
                })?;
            yaml_to_json_value(&yaml).map_err(|reason| DocumentError::Conversion {
                path: origin.to_string(),
                reason,
            })
        }
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Catalog documents use only the JSON-compatible subset of YAML. Tags are
/// dropped and the tagged value is kept.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
