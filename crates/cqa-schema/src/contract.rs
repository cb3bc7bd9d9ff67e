//! # Record Schema Contract
//!
//! The schema documents define what a valid record looks like. This module
//! holds the few facts about them that Rust code relies on: the schema file
//! names and the declaration order of fields, which fixes the order in
//! which structural errors are reported.

use cqa_core::{FieldPath, PathToken};

/// Filename of the product record schema.
pub const PRODUCT_SCHEMA: &str = "product.schema.json";

/// Filename of the variant schema referenced by the product schema.
pub const VARIANT_SCHEMA: &str = "variant.schema.json";

/// Field names in schema declaration order.
///
/// Top-level product fields come first, followed by nested fields of
/// variants, option values and FAQ items. Names shared between levels
/// (`sku`, `price`) rank by their first appearance, which keeps the
/// relative order within every object consistent with its schema.
pub const FIELD_ORDER: &[&str] = &[
    "name",
    "sku",
    "brand",
    "price",
    "description",
    "short_description",
    "images",
    "categories",
    "specs_html",
    "faq",
    "variants",
    "meta_title",
    "meta_description",
    "regulatory_disclaimer",
    // variant
    "option_values",
    "image_url",
    // option value
    "option_name",
    "value",
    // faq item
    "question",
    "answer",
];

const PRODUCT_FIELD_COUNT: usize = 14;

/// Top-level product fields, the head of [`FIELD_ORDER`].
pub fn product_fields() -> &'static [&'static str] {
    &FIELD_ORDER[..PRODUCT_FIELD_COUNT]
}

/// Sort key placing a path in document order.
///
/// Fields rank by [`FIELD_ORDER`] (unknown names after all known ones),
/// indices by their position. The root path sorts first.
pub fn order_key(path: &FieldPath) -> Vec<usize> {
    path.tokens()
        .iter()
        .map(|token| match token {
            PathToken::Index(i) => *i,
            PathToken::Field(name) => FIELD_ORDER
                .iter()
                .position(|f| *f == name.as_str())
                .unwrap_or(FIELD_ORDER.len()),
        })
        .collect()
}
