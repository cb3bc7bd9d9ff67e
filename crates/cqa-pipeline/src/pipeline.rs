//! # Validation Pipeline
//!
//! Composes the structural, policy and platform stages into one report.

use std::path::Path;

use cqa_core::{RecordView, ValidationReport};
use cqa_policy::{validate_content, RuleConfigError, RuleConfiguration};
use cqa_platform::validate_platform;
use cqa_schema::{RecordSchema, SchemaRegistry, SchemaValidationError};
use serde_json::Value;
use thiserror::Error;

/// Fatal pipeline setup failure.
///
/// Distinct from a non-empty [`ValidationReport`]: a `PipelineError` means
/// the pipeline is misconfigured, not that a product is invalid.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The record schema could not be loaded or compiled.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// The rule configuration is missing keys or malformed.
    #[error(transparent)]
    RuleConfig(#[from] RuleConfigError),
}

/// Validate one raw record.
///
/// Runs structural validation, then content and platform checks on the
/// narrowed record, and returns schema errors, then content/SEO/image
/// errors, then platform errors. Never stops early.
pub fn validate_product(
    raw: &Value,
    schema: &RecordSchema,
    rules: &RuleConfiguration,
) -> ValidationReport {
    let (record, mut errors) = schema.narrow(raw);
    let schema_errors = errors.len();

    let content = validate_content(&record, rules);
    let content_errors = content.len();
    errors.extend(content);

    let platform = validate_platform(&record);
    let platform_errors = platform.len();
    errors.extend(platform);

    tracing::debug!(
        sku = record.sku().unwrap_or("<none>"),
        structurally_valid = record.is_valid(),
        schema_errors,
        content_errors,
        platform_errors,
        "validated product record"
    );

    ValidationReport::new(errors)
}

/// A reusable validator holding a compiled schema and a rule set.
///
/// Immutable and `Send + Sync`: build it once and share it (e.g. in an
/// `Arc`) across threads.
#[derive(Debug)]
pub struct CatalogValidator {
    schema: RecordSchema,
    rules: RuleConfiguration,
}

impl CatalogValidator {
    /// Combine an already compiled schema and a loaded rule set.
    pub fn new(schema: RecordSchema, rules: RuleConfiguration) -> Self {
        Self { schema, rules }
    }

    /// Use the bundled record schema with the given rules.
    pub fn with_bundled_schema(rules: RuleConfiguration) -> Result<Self, PipelineError> {
        Ok(Self::new(RecordSchema::bundled()?, rules))
    }

    /// Load the rule configuration from `rules_path` and the schemas from
    /// `schema_dir`, or the bundled schemas when `schema_dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Schema`] or [`PipelineError::RuleConfig`]
    /// if either input is unusable.
    pub fn from_paths(schema_dir: Option<&Path>, rules_path: &Path) -> Result<Self, PipelineError> {
        let registry = match schema_dir {
            Some(dir) => SchemaRegistry::new(dir)?,
            None => SchemaRegistry::bundled()?,
        };
        let schema = registry.product_schema()?;
        let rules = RuleConfiguration::load(rules_path)?;
        tracing::debug!(
            schemas = %registry.origin().display(),
            rules = %rules_path.display(),
            "catalog validator ready"
        );
        Ok(Self::new(schema, rules))
    }

    /// The compiled record schema.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// The rule configuration.
    pub fn rules(&self) -> &RuleConfiguration {
        &self.rules
    }

    /// Validate one raw record.
    pub fn validate(&self, raw: &Value) -> ValidationReport {
        validate_product(raw, &self.schema, &self.rules)
    }

    /// Validate several records independently, preserving input order.
    pub fn validate_batch(&self, records: &[Value]) -> Vec<ValidationReport> {
        records.iter().map(|raw| self.validate(raw)).collect()
    }
}
