//! # Catalog Identifiers
//!
//! Newtype wrapper for stock-keeping units so a SKU cannot be confused with
//! any other free-text product field in the typed model.

use serde::{Deserialize, Serialize};

/// Stock-keeping unit of a product or one of its variants.
///
/// The schema only guarantees a SKU is a string. Emptiness and uniqueness
/// are platform concerns checked by `cqa-platform`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(pub String);

impl Sku {
    /// Wrap a SKU string.
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }

    /// Access the SKU as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the SKU is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
