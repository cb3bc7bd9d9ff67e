//! # Validation Report
//!
//! A validation run produces an ordered list of [`ValidationError`] values.
//! An empty report means the record is fully valid and ingestible; any
//! entry means the record must not be published.
//!
//! Reports serialize as a JSON array of `{category, message, path?}`
//! objects. `path` is only present on schema errors and is a sequence of
//! field names and array indices, e.g. `["variants", 1, "sku"]`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which stage of the pipeline found a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Structural schema violation.
    Schema,
    /// Content policy violation (disclaimer, banned phrases).
    Content,
    /// SEO length policy violation.
    #[serde(rename = "SEO")]
    Seo,
    /// Image count policy violation.
    Images,
    /// Storefront platform ingestion constraint violation.
    Platform,
}

impl ErrorCategory {
    /// Stable label used in serialized reports and display output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Schema => "Schema",
            Self::Content => "Content",
            Self::Seo => "SEO",
            Self::Images => "Images",
            Self::Platform => "Platform",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathToken {
    /// Position within an array.
    Index(usize),
    /// Property name within an object.
    Field(String),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Field(name) => f.write_str(name),
        }
    }
}

/// Location of a value inside a record, e.g. `variants/1/sku`.
///
/// The empty path denotes the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathToken>);

impl FieldPath {
    /// The path of the record root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from tokens.
    pub fn new(tokens: Vec<PathToken>) -> Self {
        Self(tokens)
    }

    /// Returns a copy of this path extended by a property name.
    pub fn with_field(&self, name: impl Into<String>) -> Self {
        let mut tokens = self.0.clone();
        tokens.push(PathToken::Field(name.into()));
        Self(tokens)
    }

    /// Returns a copy of this path extended by an array index.
    pub fn with_index(&self, index: usize) -> Self {
        let mut tokens = self.0.clone();
        tokens.push(PathToken::Index(index));
        Self(tokens)
    }

    /// Tokens from the root outward.
    pub fn tokens(&self) -> &[PathToken] {
        &self.0
    }

    /// True for the record root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert a JSON Pointer (RFC 6901) into a field path.
    ///
    /// `instance` disambiguates numeric segments: a segment is an index
    /// only where the pointer walks through an array. Once the pointer
    /// leaves the instance, remaining segments are property names.
    pub fn from_pointer(pointer: &str, instance: &Value) -> Self {
        let mut tokens = Vec::new();
        let mut cursor = Some(instance);
        for raw in pointer.split('/').skip(1) {
            let segment = raw.replace("~1", "/").replace("~0", "~");
            let token = match (cursor, segment.parse::<usize>()) {
                (Some(Value::Array(items)), Ok(index)) => {
                    cursor = items.get(index);
                    PathToken::Index(index)
                }
                (Some(Value::Object(map)), _) => {
                    cursor = map.get(&segment);
                    PathToken::Field(segment)
                }
                _ => {
                    cursor = None;
                    PathToken::Field(segment)
                }
            };
            tokens.push(token);
        }
        Self(tokens)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// A single defect found in a product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The stage that found the defect.
    pub category: ErrorCategory,
    /// Human-readable description.
    pub message: String,
    /// Location of the defect. Only schema errors carry a path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<FieldPath>,
}

impl ValidationError {
    /// A structural schema violation at `path`.
    pub fn schema(message: impl Into<String>, path: FieldPath) -> Self {
        Self {
            category: ErrorCategory::Schema,
            message: message.into(),
            path: Some(path),
        }
    }

    /// A content policy violation.
    pub fn content(message: impl Into<String>) -> Self {
        Self::unlocated(ErrorCategory::Content, message)
    }

    /// An SEO policy violation.
    pub fn seo(message: impl Into<String>) -> Self {
        Self::unlocated(ErrorCategory::Seo, message)
    }

    /// An image policy violation.
    pub fn images(message: impl Into<String>) -> Self {
        Self::unlocated(ErrorCategory::Images, message)
    }

    /// A platform ingestion constraint violation.
    pub fn platform(message: impl Into<String>) -> Self {
        Self::unlocated(ErrorCategory::Platform, message)
    }

    fn unlocated(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            path: None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)?;
        if let Some(path) = &self.path {
            write!(f, " at {path}")?;
        }
        Ok(())
    }
}

/// Ordered, aggregated result of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Wrap an ordered error list.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// True when the record may be published.
    pub fn is_publishable(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors in report order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Number of errors in one category.
    pub fn count(&self, category: ErrorCategory) -> usize {
        self.errors.iter().filter(|e| e.category == category).count()
    }

    /// Categories in report order, one entry per error.
    pub fn categories(&self) -> Vec<ErrorCategory> {
        self.errors.iter().map(|e| e.category).collect()
    }

    /// Iterate over errors in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl FromIterator<ValidationError> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pointer_indices_follow_arrays_only() {
        let instance = json!({
            "variants": [{"sku": "A"}, {"sku": 7}],
            "attributes": {"0": "zero"}
        });
        let path = FieldPath::from_pointer("/variants/1/sku", &instance);
        assert_eq!(
            path.tokens(),
            &[
                PathToken::Field("variants".into()),
                PathToken::Index(1),
                PathToken::Field("sku".into()),
            ]
        );
        assert_eq!(path.to_string(), "variants/1/sku");

        let object_key = FieldPath::from_pointer("/attributes/0", &instance);
        assert_eq!(object_key.tokens()[1], PathToken::Field("0".into()));
    }

    #[test]
    fn pointer_escapes_are_decoded() {
        let instance = json!({"a/b": {"c~d": 1}});
        let path = FieldPath::from_pointer("/a~1b/c~0d", &instance);
        assert_eq!(path.to_string(), "a/b/c~d");
    }

    #[test]
    fn empty_pointer_is_root() {
        let path = FieldPath::from_pointer("", &json!({}));
        assert!(path.is_root());
        assert_eq!(path.to_string(), "(root)");
    }

    #[test]
    fn schema_error_serializes_with_path() {
        let err = ValidationError::schema(
            "\"\" is shorter than 3 characters",
            FieldPath::root().with_field("variants").with_index(1).with_field("sku"),
        );
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["category"], "Schema");
        assert_eq!(value["path"], json!(["variants", 1, "sku"]));
    }

    #[test]
    fn policy_errors_serialize_without_path() {
        let value = serde_json::to_value(ValidationError::seo("meta_title too long")).unwrap();
        assert_eq!(value, json!({"category": "SEO", "message": "meta_title too long"}));
    }

    #[test]
    fn report_round_trips_through_json_array() {
        let report = ValidationReport::new(vec![
            ValidationError::schema("missing", FieldPath::root().with_field("categories")),
            ValidationError::images("not enough images"),
        ]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.is_array());
        let back: ValidationReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.count(ErrorCategory::Images), 1);
        assert!(!back.is_publishable());
    }

    #[test]
    fn display_includes_category_and_location() {
        let err = ValidationError::schema("bad", FieldPath::root().with_field("price"));
        assert_eq!(err.to_string(), "Schema: bad at price");
        assert_eq!(ValidationError::platform("x").to_string(), "Platform: x");
    }
}
