//! # Storefront Ingestion Constraints
//!
//! The platform rejects a product whose SKU is missing, whose variants
//! share a SKU with each other or with the product, or whose variants lack
//! option values.

use std::collections::HashSet;

use cqa_core::{RecordView, ValidationError};

/// Check a record against the platform's ingestion constraints.
///
/// Errors are reported for the product SKU first, then per variant in
/// record order. Every repeat of a variant SKU after its first sighting is
/// flagged, so `[A, B, A, C, A]` yields two duplicate errors.
pub fn validate_platform<R>(record: &R) -> Vec<ValidationError>
where
    R: RecordView + ?Sized,
{
    let mut errors = Vec::new();

    let product_sku = record.sku().filter(|sku| !sku.is_empty());
    if product_sku.is_none() {
        errors.push(ValidationError::platform("product SKU is missing or empty"));
    }

    let variants = record.variants();
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, variant) in variants.iter().enumerate() {
        if let Some(sku) = variant.sku {
            if seen.contains(sku) {
                errors.push(ValidationError::platform(format!("duplicate variant SKU {sku}")));
            }
            if product_sku == Some(sku) {
                errors.push(ValidationError::platform(format!(
                    "variant SKU {sku} collides with the product SKU"
                )));
            }
            seen.insert(sku);
        }

        if variant.option_value_count == 0 {
            let message = match variant.sku {
                Some(sku) => format!("variant {sku} is missing option_values"),
                None => format!("variant at position {index} is missing option_values"),
            };
            errors.push(ValidationError::platform(message));
        }
    }

    errors
}
