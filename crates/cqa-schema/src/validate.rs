//! # Structural Validation
//!
//! Runtime validation of raw product records against the record schema
//! (JSON Schema Draft 2020-12).
//!
//! ## Trust Boundary
//!
//! The structural validator is the single place where a record of unknown
//! shape becomes either schema-conformant or rejected. It never stops at the
//! first violation: every violation is reported as a `Schema`
//! [`ValidationError`] with the [`FieldPath`] of the offending value.
//!
//! ## Schema Resolution
//!
//! All schemas use `$id` URIs of the form:
//!   `https://schemas.catalog-qa.dev/product/<filename>`
//!
//! Cross-schema `$ref` URIs use the same pattern and are resolved against
//! the loaded registry, never over the network. Internal `$ref`s of the
//! form `#/$defs/<name>` are resolved by the jsonschema crate natively.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use cqa_core::{FieldPath, ProductRecord, RawRecord, ValidationError};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::contract::{order_key, PRODUCT_SCHEMA, VARIANT_SCHEMA};

/// URI prefix used by the `$id` of every schema in this repository.
const SCHEMA_URI_PREFIX: &str = "https://schemas.catalog-qa.dev/product/";

const BUNDLED_SCHEMAS: &[(&str, &str)] = &[
    (PRODUCT_SCHEMA, include_str!("../../../schemas/product.schema.json")),
    (VARIANT_SCHEMA, include_str!("../../../schemas/variant.schema.json")),
];

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
///
/// Prevents the jsonschema crate from making network requests for
/// cross-schema references.
struct LocalSchemaRetriever {
    /// Map from URI string to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Fall back to the bare filename, for `$ref`s written relative to
        // a different base.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        // An empty sub-schema here would accept any variant.
        Err(format!("unresolved schema reference: {uri_str}").into())
    }
}

/// Error setting up structural validation.
///
/// None of these describe a product record; they mean the schema documents
/// themselves are missing or broken.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading a schema.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Registry of schema documents keyed by filename.
///
/// Loads the documents once, registers them for `$ref` resolution, and
/// compiles [`RecordSchema`]s on request.
#[derive(Debug)]
pub struct SchemaRegistry {
    /// Where the schemas came from, for error messages.
    origin: PathBuf,
    /// Map from schema filename (e.g., "product.schema.json") to parsed JSON value.
    schemas: HashMap<String, Value>,
}

impl SchemaRegistry {
    /// Create a registry by loading all schemas from the given directory.
    ///
    /// Reads every `*.schema.json` file in `schema_dir` and indexes it by
    /// filename.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the directory or
    /// any schema file cannot be read or parsed as JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_dir.display().to_string(),
                reason: format!("cannot read schema directory: {e}"),
            }
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.ends_with(".schema.json") {
                    let content = std::fs::read_to_string(&path)?;
                    let value: Value = serde_json::from_str(&content).map_err(|e| {
                        SchemaValidationError::SchemaLoadError {
                            schema_name: name.to_string(),
                            reason: format!("invalid JSON: {e}"),
                        }
                    })?;
                    schemas.insert(name.to_string(), value);
                }
            }
        }

        Ok(Self {
            origin: schema_dir,
            schemas,
        })
    }

    /// Create a registry from the schema documents compiled into this crate.
    pub fn bundled() -> Result<Self, SchemaValidationError> {
        let mut schemas = HashMap::new();
        for (name, content) in BUNDLED_SCHEMAS {
            let value: Value = serde_json::from_str(content).map_err(|e| {
                SchemaValidationError::SchemaLoadError {
                    schema_name: (*name).to_string(),
                    reason: format!("invalid bundled JSON: {e}"),
                }
            })?;
            schemas.insert((*name).to_string(), value);
        }
        Ok(Self {
            origin: PathBuf::from("<bundled>"),
            schemas,
        })
    }

    /// Where the schemas were loaded from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Build `ValidationOptions` with every schema registered for `$ref`
    /// resolution under its canonical URI, its own `$id`, and its bare
    /// filename.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            schemas_by_uri.insert(format!("{SCHEMA_URI_PREFIX}{filename}"), value.clone());
            if let Some(id_str) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id_str.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }

        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        opts
    }

    /// Compile a named schema into a [`RecordSchema`].
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the schema is not found.
    /// Returns `SchemaValidationError::ValidatorBuildError` if the schema
    /// is invalid or references a schema that is not loaded.
    pub fn compile(&self, schema_name: &str) -> Result<RecordSchema, SchemaValidationError> {
        let schema_value = self.schemas.get(schema_name).ok_or_else(|| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.to_string(),
                reason: format!("schema not found in {}", self.origin.display()),
            }
        })?;

        let validator = self.build_options().build(schema_value).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(RecordSchema {
            name: schema_name.to_string(),
            validator,
        })
    }

    /// Compile the product record schema.
    pub fn product_schema(&self) -> Result<RecordSchema, SchemaValidationError> {
        self.compile(PRODUCT_SCHEMA)
    }
}

/// A compiled record schema.
///
/// `RecordSchema` is `Send + Sync` and immutable: build it once and share
/// it across validation calls and threads.
pub struct RecordSchema {
    name: String,
    validator: Validator,
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl RecordSchema {
    /// Compile the bundled product record schema.
    pub fn bundled() -> Result<Self, SchemaValidationError> {
        SchemaRegistry::bundled()?.product_schema()
    }

    /// Filename of the schema this was compiled from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check a raw record. See [`validate_structure`].
    pub fn validate_structure(&self, raw: &Value) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = self
            .validator
            .iter_errors(raw)
            .map(|e| {
                let mut path = FieldPath::from_pointer(&e.instance_path.to_string(), raw);
                // A missing property is located at the property itself
                // rather than at the object that lacks it.
                if let ValidationErrorKind::Required { property } = &e.kind {
                    if let Some(name) = property.as_str() {
                        path = path.with_field(name);
                    }
                }
                ValidationError::schema(e.to_string(), path)
            })
            .collect();

        errors.sort_by_cached_key(|e| e.path.as_ref().map(order_key).unwrap_or_default());
        errors
    }

    /// Check a raw record and narrow it. See [`narrow`].
    pub fn narrow(&self, raw: &Value) -> (RawRecord, Vec<ValidationError>) {
        let errors = self.validate_structure(raw);
        if !errors.is_empty() {
            return (RawRecord::partial(raw), errors);
        }
        match serde_json::from_value::<ProductRecord>(raw.clone()) {
            Ok(record) => (RawRecord::Valid(record), errors),
            Err(e) => {
                // The schema is the authority on structure; a typed-model
                // mismatch is logged and the record is treated as partial.
                tracing::warn!(
                    schema = %self.name,
                    error = %e,
                    "schema-conformant record failed typed deserialization"
                );
                (RawRecord::partial(raw), errors)
            }
        }
    }
}

/// Check a raw record against the record schema.
///
/// Returns an empty list if the record conforms. Otherwise returns one
/// `Schema` error per violation, ordered by the schema's field declaration
/// order.
pub fn validate_structure(raw: &Value, schema: &RecordSchema) -> Vec<ValidationError> {
    schema.validate_structure(raw)
}

/// Check a raw record and convert it into a [`RawRecord`].
///
/// A conformant record becomes [`RawRecord::Valid`]; anything else becomes
/// a best-effort [`RawRecord::Partial`] alongside its schema errors.
pub fn narrow(raw: &Value, schema: &RecordSchema) -> (RawRecord, Vec<ValidationError>) {
    schema.narrow(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqa_core::{ErrorCategory, PathToken};
    use serde_json::json;

    /// Find the repository root from this crate's manifest directory.
    fn repo_root() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates/
        dir.pop(); // repo root
        dir
    }

    fn schema_dir() -> PathBuf {
        repo_root().join("schemas")
    }

    fn product_schema() -> RecordSchema {
        SchemaRegistry::new(schema_dir()).unwrap().product_schema().unwrap()
    }

    fn valid_record() -> Value {
        json!({
            "name": "Magnesium Glycinate 120ct",
            "sku": "MG-120",
            "brand": "Northwell",
            "price": 24.99,
            "description": "Highly absorbable magnesium glycinate capsules for daily use.",
            "short_description": "Gentle magnesium.",
            "images": ["https://cdn.example.com/mg-120/front.jpg"],
            "categories": ["Supplements", "Minerals"],
            "faq": [{"question": "Vegan?", "answer": "Yes."}],
            "variants": [
                {
                    "sku": "MG-120-1",
                    "price": 24.99,
                    "option_values": [{"option_name": "Count", "value": "120"}]
                },
                {
                    "sku": "MG-240-1",
                    "price": 44.99,
                    "option_values": [{"option_name": "Count", "value": "240"}],
                    "image_url": "https://cdn.example.com/mg-240/front.jpg"
                }
            ],
            "meta_title": "Magnesium Glycinate",
            "meta_description": "Magnesium glycinate capsules.",
            "regulatory_disclaimer": "Consult a physician before use."
        })
    }

    fn paths(errors: &[ValidationError]) -> Vec<String> {
        errors
            .iter()
            .map(|e| e.path.as_ref().map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_load_schema_directory() {
        let registry = SchemaRegistry::new(schema_dir()).unwrap();
        let names = registry.schema_names();
        assert!(names.contains(&PRODUCT_SCHEMA));
        assert!(names.contains(&VARIANT_SCHEMA));
    }

    #[test]
    fn test_bundled_schemas_match_directory() {
        let bundled = SchemaRegistry::bundled().unwrap();
        let on_disk = SchemaRegistry::new(schema_dir()).unwrap();
        for name in bundled.schema_names() {
            assert_eq!(bundled.get_schema(name), on_disk.get_schema(name), "{name} differs");
        }
    }

    #[test]
    fn test_schema_properties_match_field_order() {
        let registry = SchemaRegistry::bundled().unwrap();
        let schema = registry.get_schema(PRODUCT_SCHEMA).unwrap();
        let mut declared: Vec<&str> = schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected = crate::contract::product_fields().to_vec();
        declared.sort();
        expected.sort();
        assert_eq!(declared, expected);
    }

    #[test]
    fn test_valid_record_has_no_errors() {
        let schema = product_schema();
        assert!(schema.validate_structure(&valid_record()).is_empty());
        let (record, errors) = narrow(&valid_record(), &schema);
        assert!(errors.is_empty());
        let typed = record.as_valid().expect("record should narrow to Valid");
        assert_eq!(typed.variants.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_missing_categories_located_at_field() {
        let schema = product_schema();
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove("categories");
        let errors = validate_structure(&record, &schema);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, ErrorCategory::Schema);
        assert_eq!(paths(&errors), vec!["categories"]);
        assert!(errors[0].message.contains("categories"));
    }

    #[test]
    fn test_empty_categories_rejected() {
        let schema = product_schema();
        let mut record = valid_record();
        record["categories"] = json!([]);
        let errors = validate_structure(&record, &schema);
        assert_eq!(paths(&errors), vec!["categories"]);
    }

    #[test]
    fn test_all_violations_reported_in_document_order() {
        let schema = product_schema();
        let mut record = valid_record();
        record["meta_title"] = json!("x".repeat(71));
        record["variants"][1]["sku"] = json!(42);
        record["price"] = json!(-1);
        record["name"] = json!("ab");
        let errors = validate_structure(&record, &schema);
        assert_eq!(
            paths(&errors),
            vec!["name", "price", "variants/1/sku", "meta_title"]
        );
        assert!(errors.iter().all(|e| e.category == ErrorCategory::Schema));
    }

    #[test]
    fn test_variant_path_uses_index_tokens() {
        let schema = product_schema();
        let mut record = valid_record();
        record["variants"][0]["option_values"] = json!([]);
        let errors = validate_structure(&record, &schema);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].path.as_ref().unwrap().tokens(),
            &[
                PathToken::Field("variants".into()),
                PathToken::Index(0),
                PathToken::Field("option_values".into()),
            ]
        );
    }

    #[test]
    fn test_image_urls_must_be_http() {
        let schema = product_schema();
        let mut record = valid_record();
        record["images"] = json!(["https://cdn.example.com/ok.jpg", "not a url"]);
        let errors = validate_structure(&record, &schema);
        assert_eq!(paths(&errors), vec!["images/1"]);
    }

    #[test]
    fn test_missing_variant_fields_reported_per_field() {
        let schema = product_schema();
        let mut record = valid_record();
        record["variants"][1] = json!({"sku": "MG-240-1"});
        let errors = validate_structure(&record, &schema);
        assert_eq!(paths(&errors), vec!["variants/1/price", "variants/1/option_values"]);
    }

    #[test]
    fn test_non_object_record_rejected_at_root() {
        let schema = product_schema();
        let errors = validate_structure(&json!("just a string"), &schema);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].path.as_ref().unwrap().is_root());
        let (record, _) = narrow(&json!("just a string"), &schema);
        assert!(!record.is_valid());
    }

    #[test]
    fn test_null_optionals_accepted() {
        let schema = product_schema();
        let mut record = valid_record();
        record["short_description"] = Value::Null;
        record["variants"] = Value::Null;
        record["meta_title"] = Value::Null;
        let (narrowed, errors) = narrow(&record, &schema);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert!(narrowed.is_valid());
    }

    #[test]
    fn test_invalid_record_narrows_to_partial() {
        let schema = product_schema();
        let mut record = valid_record();
        record["price"] = json!(-5);
        let (narrowed, errors) = narrow(&record, &schema);
        assert_eq!(errors.len(), 1);
        match narrowed {
            RawRecord::Partial(partial) => {
                assert_eq!(partial.price, Some(-5.0));
                assert_eq!(partial.sku.as_deref(), Some("MG-120"));
            }
            RawRecord::Valid(_) => panic!("negative price must not narrow to Valid"),
        }
    }

    #[test]
    fn test_schema_not_found() {
        let registry = SchemaRegistry::new(schema_dir()).unwrap();
        let err = registry.compile("nonexistent.schema.json").unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::SchemaLoadError { .. }),
            "Expected SchemaLoadError, got: {err}"
        );
    }

    #[test]
    fn test_missing_directory_is_load_error() {
        let err = SchemaRegistry::new("/nonexistent/schemas").unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaLoadError { .. }));
    }

    #[test]
    fn test_malformed_schema_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("product.schema.json"), "{ nope").unwrap();
        let err = SchemaRegistry::new(dir.path()).unwrap_err();
        match err {
            SchemaValidationError::SchemaLoadError { schema_name, .. } => {
                assert_eq!(schema_name, "product.schema.json");
            }
            other => panic!("Expected SchemaLoadError, got: {other}"),
        }
    }

    #[test]
    fn test_record_schema_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecordSchema>();
        let schema = RecordSchema::bundled().unwrap();
        assert_eq!(schema.name(), PRODUCT_SCHEMA);
    }
}
