//! # Record Views
//!
//! The content and platform stages must run on every record, including
//! records that failed structural validation. They therefore read records
//! through [`RecordView`], which both the typed [`ProductRecord`] and the
//! best-effort [`PartialRecord`] implement.
//!
//! A [`PartialRecord`] never fails to build: a missing or wrongly typed
//! field is simply absent, and sequence fields default to empty.

use serde_json::{Map, Value};

use crate::record::ProductRecord;

/// Read access to the record fields that the policy and platform stages
/// inspect.
pub trait RecordView {
    /// Product SKU, if present as a string.
    fn sku(&self) -> Option<&str>;
    /// Long description.
    fn description(&self) -> Option<&str>;
    /// Short description.
    fn short_description(&self) -> Option<&str>;
    /// Category names.
    fn categories(&self) -> &[String];
    /// Number of entries in `images`.
    fn image_count(&self) -> usize;
    /// SEO title.
    fn meta_title(&self) -> Option<&str>;
    /// SEO description.
    fn meta_description(&self) -> Option<&str>;
    /// Compliance disclaimer text.
    fn regulatory_disclaimer(&self) -> Option<&str>;
    /// Variants in record order. Empty when the record has none.
    fn variants(&self) -> Vec<VariantView<'_>>;
}

/// The parts of a variant the platform checker needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantView<'a> {
    /// Variant SKU, if present as a string.
    pub sku: Option<&'a str>,
    /// Number of option values. Zero when absent.
    pub option_value_count: usize,
}

impl RecordView for ProductRecord {
    fn sku(&self) -> Option<&str> {
        Some(self.sku.as_str())
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn image_count(&self) -> usize {
        self.images.len()
    }

    fn meta_title(&self) -> Option<&str> {
        self.meta_title.as_deref()
    }

    fn meta_description(&self) -> Option<&str> {
        self.meta_description.as_deref()
    }

    fn regulatory_disclaimer(&self) -> Option<&str> {
        self.regulatory_disclaimer.as_deref()
    }

    fn variants(&self) -> Vec<VariantView<'_>> {
        self.variants
            .iter()
            .flatten()
            .map(|v| VariantView {
                sku: Some(v.sku.as_str()),
                option_value_count: v.option_values.len(),
            })
            .collect()
    }
}

/// Best-effort variant extracted from a possibly malformed record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialVariant {
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub option_value_count: usize,
}

/// Best-effort view of a record that did not pass the record schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRecord {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    /// Every entry of `images`. Non-string entries are kept as their JSON
    /// text so the image count matches the input.
    pub images: Vec<String>,
    /// String entries of `categories`.
    pub categories: Vec<String>,
    pub specs_html: Option<String>,
    pub variants: Option<Vec<PartialVariant>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub regulatory_disclaimer: Option<String>,
}

impl PartialRecord {
    /// Extract every usable field from an arbitrary JSON value.
    ///
    /// Non-object input yields an empty record.
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        let images: Vec<String> = obj
            .get("images")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let categories: Vec<String> = obj
            .get("categories")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();

        let variants = obj.get("variants").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .map(|item| PartialVariant {
                    sku: string_field(item, "sku"),
                    price: item.get("price").and_then(Value::as_f64),
                    option_value_count: item
                        .get("option_values")
                        .and_then(Value::as_array)
                        .map_or(0, Vec::len),
                })
                .collect()
        });

        Self {
            name: string_field(value, "name"),
            sku: string_field(value, "sku"),
            brand: string_field(value, "brand"),
            price: obj.get("price").and_then(Value::as_f64),
            description: string_field(value, "description"),
            short_description: string_field(value, "short_description"),
            images,
            categories,
            specs_html: string_field(value, "specs_html"),
            variants,
            meta_title: string_field(value, "meta_title"),
            meta_description: string_field(value, "meta_description"),
            regulatory_disclaimer: string_field(value, "regulatory_disclaimer"),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

impl RecordView for PartialRecord {
    fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn image_count(&self) -> usize {
        self.images.len()
    }

    fn meta_title(&self) -> Option<&str> {
        self.meta_title.as_deref()
    }

    fn meta_description(&self) -> Option<&str> {
        self.meta_description.as_deref()
    }

    fn regulatory_disclaimer(&self) -> Option<&str> {
        self.regulatory_disclaimer.as_deref()
    }

    fn variants(&self) -> Vec<VariantView<'_>> {
        self.variants
            .iter()
            .flatten()
            .map(|v| VariantView {
                sku: v.sku.as_deref(),
                option_value_count: v.option_value_count,
            })
            .collect()
    }
}

/// A candidate record after structural narrowing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// The record conforms to the record schema.
    Valid(ProductRecord),
    /// The record failed the schema; fields are best-effort.
    Partial(PartialRecord),
}

impl RawRecord {
    /// Best-effort view of an unchecked value.
    pub fn partial(value: &Value) -> Self {
        Self::Partial(PartialRecord::from_value(value))
    }

    /// True if the record passed structural validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The typed record, if structurally valid.
    pub fn as_valid(&self) -> Option<&ProductRecord> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Partial(_) => None,
        }
    }

    fn view(&self) -> &dyn RecordView {
        match self {
            Self::Valid(record) => record,
            Self::Partial(record) => record,
        }
    }
}

impl From<ProductRecord> for RawRecord {
    fn from(record: ProductRecord) -> Self {
        Self::Valid(record)
    }
}

impl RecordView for RawRecord {
    fn sku(&self) -> Option<&str> {
        self.view().sku()
    }

    fn description(&self) -> Option<&str> {
        self.view().description()
    }

    fn short_description(&self) -> Option<&str> {
        self.view().short_description()
    }

    fn categories(&self) -> &[String] {
        self.view().categories()
    }

    fn image_count(&self) -> usize {
        self.view().image_count()
    }

    fn meta_title(&self) -> Option<&str> {
        self.view().meta_title()
    }

    fn meta_description(&self) -> Option<&str> {
        self.view().meta_description()
    }

    fn regulatory_disclaimer(&self) -> Option<&str> {
        self.view().regulatory_disclaimer()
    }

    fn variants(&self) -> Vec<VariantView<'_>> {
        self.view().variants()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrongly_typed_fields_are_absent() {
        let partial = PartialRecord::from_value(&json!({
            "sku": 42,
            "price": "free",
            "description": null,
            "categories": ["Supplements", 7, null],
            "images": ["https://cdn.example.com/a.jpg", 3]
        }));
        assert_eq!(partial.sku, None);
        assert_eq!(partial.price, None);
        assert_eq!(partial.description, None);
        assert_eq!(partial.categories, vec!["Supplements".to_string()]);
        assert_eq!(partial.image_count(), 2);
    }

    #[test]
    fn non_object_input_is_empty() {
        let partial = PartialRecord::from_value(&json!(["not", "a", "record"]));
        assert_eq!(partial, PartialRecord::default());
        assert!(partial.variants().is_empty());
    }

    #[test]
    fn partial_variants_count_option_values() {
        let partial = PartialRecord::from_value(&json!({
            "variants": [
                {"sku": "A", "option_values": [{"option_name": "Size", "value": "S"}]},
                {"sku": "B"},
                "garbage"
            ]
        }));
        let views = partial.variants();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0], VariantView { sku: Some("A"), option_value_count: 1 });
        assert_eq!(views[1], VariantView { sku: Some("B"), option_value_count: 0 });
        assert_eq!(views[2], VariantView { sku: None, option_value_count: 0 });
    }

    #[test]
    fn raw_record_delegates_to_inner_view() {
        let record: ProductRecord = serde_json::from_value(json!({
            "name": "Omega Caps",
            "sku": "OM-3",
            "brand": "Northwell",
            "price": 12.5,
            "description": "Fish oil capsules with 1000mg omega-3 per serving.",
            "images": [],
            "categories": ["Supplements"],
            "meta_title": "Omega Caps"
        }))
        .unwrap();
        let raw = RawRecord::from(record);
        assert!(raw.is_valid());
        assert_eq!(raw.sku(), Some("OM-3"));
        assert_eq!(raw.meta_title(), Some("Omega Caps"));
        assert_eq!(raw.categories(), &["Supplements".to_string()]);
        assert!(raw.variants().is_empty());

        let partial = RawRecord::partial(&json!({"sku": "OM-3"}));
        assert!(!partial.is_valid());
        assert!(partial.as_valid().is_none());
        assert_eq!(partial.sku(), Some("OM-3"));
    }
}
