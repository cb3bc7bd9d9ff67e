//! # Rule Configuration
//!
//! The operator-supplied rule set, loaded from JSON or YAML:
//!
//! ```yaml
//! required_disclaimer: "Consult a physician before use."
//! banned_phrases: ["miracle cure", "guaranteed results"]
//! seo:
//!   title_max: 70
//!   description_max: 160
//! images:
//!   min_count: 1
//! ```
//!
//! Every key is required. Loading fails fast on a missing key, a wrongly
//! typed value, or an unknown key, so a misconfigured rule set can never be
//! mistaken for a product that passed every rule.

use std::path::Path;

use cqa_core::{load_document, parse_document, DocumentError, DocumentFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Dotted paths of every key a rule configuration must define.
pub const REQUIRED_KEYS: &[&str] = &[
    "required_disclaimer",
    "banned_phrases",
    "seo.title_max",
    "seo.description_max",
    "images.min_count",
];

/// Error loading a rule configuration.
///
/// Always a pipeline setup problem, never a product defect.
#[derive(Error, Debug)]
pub enum RuleConfigError {
    /// One or more required keys are absent or null.
    #[error("rule configuration is missing required keys: {}", .keys.join(", "))]
    MissingKeys {
        /// Dotted paths of the missing keys, in [`REQUIRED_KEYS`] order.
        keys: Vec<String>,
    },

    /// A key has the wrong type or an unusable value.
    #[error("invalid rule configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },

    /// The configuration document could not be read or parsed.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// SEO length limits, in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeoRules {
    /// Maximum `meta_title` length.
    pub title_max: usize,
    /// Maximum `meta_description` length.
    pub description_max: usize,
}

/// Media requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRules {
    /// Minimum number of entries in `images`.
    pub min_count: usize,
}

/// A complete, immutable rule set for one or more validation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfiguration {
    /// Disclaimer text regulated products must carry. Empty disables the rule.
    pub required_disclaimer: String,
    /// Phrases that must not appear in description text, matched
    /// case-insensitively.
    pub banned_phrases: Vec<String>,
    pub seo: SeoRules,
    pub images: ImageRules,
}

impl RuleConfiguration {
    /// Build a configuration from a parsed document.
    ///
    /// # Errors
    ///
    /// - [`RuleConfigError::MissingKeys`] listing every absent key.
    /// - [`RuleConfigError::Invalid`] for a non-mapping document, a wrongly
    ///   typed value, an unknown key, or a blank banned phrase.
    pub fn from_value(value: &Value) -> Result<Self, RuleConfigError> {
        if !value.is_object() {
            return Err(RuleConfigError::Invalid {
                reason: "rule configuration must be a mapping".to_string(),
            });
        }

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| lookup(value, key).map_or(true, Value::is_null))
            .map(|key| (*key).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RuleConfigError::MissingKeys { keys: missing });
        }

        let config: Self =
            serde_json::from_value(value.clone()).map_err(|e| RuleConfigError::Invalid {
                reason: e.to_string(),
            })?;
        config.check()?;
        Ok(config)
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(content: &str) -> Result<Self, RuleConfigError> {
        Self::from_value(&parse_document(content, DocumentFormat::Json, "<inline>")?)
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(content: &str) -> Result<Self, RuleConfigError> {
        Self::from_value(&parse_document(content, DocumentFormat::Yaml, "<inline>")?)
    }

    /// Load a configuration file; `.yaml`/`.yml` is parsed as YAML,
    /// anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, RuleConfigError> {
        Self::from_value(&load_document(path)?)
    }

    fn check(&self) -> Result<(), RuleConfigError> {
        if let Some(pos) = self.banned_phrases.iter().position(|p| p.trim().is_empty()) {
            return Err(RuleConfigError::Invalid {
                reason: format!("banned_phrases[{pos}] is blank and would match every record"),
            });
        }
        Ok(())
    }
}

/// Follow a dotted key path through nested mappings.
fn lookup<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(value, |node, key| node.get(key))
}
