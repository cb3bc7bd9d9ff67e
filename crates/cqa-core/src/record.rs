//! # Product Record Model
//!
//! The fully typed shape of a structurally valid product record. Values of
//! these types are only produced after the record has passed the record
//! schema; constraint checks (lengths, bounds, non-empty sequences) live in
//! the schema documents, not here.

use serde::{Deserialize, Serialize};

use crate::identity::Sku;

/// One option coordinate of a variant, e.g. `Size = M`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    /// Option name, e.g. `Size`.
    pub option_name: String,
    /// Option value, e.g. `M`.
    pub value: String,
}

/// A purchasable sub-item of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant SKU. Must differ from every sibling and from the product SKU.
    pub sku: Sku,
    /// Non-negative price.
    pub price: f64,
    /// Option coordinates distinguishing this variant.
    pub option_values: Vec<OptionValue>,
    /// Optional variant-specific image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A question/answer pair shown on the product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    /// The question.
    pub question: String,
    /// The answer.
    pub answer: String,
}

/// A structurally valid product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Display name, 3 to 255 characters.
    pub name: String,
    /// Product SKU.
    pub sku: Sku,
    /// Brand name.
    pub brand: String,
    /// Non-negative price.
    pub price: f64,
    /// Long description, at least 30 characters.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Category names. Never empty.
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<Vec<FaqItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
    /// SEO title, at most 70 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    /// SEO description, at most 160 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// Free-text compliance disclaimer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulatory_disclaimer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_full_record() {
        let record: ProductRecord = serde_json::from_value(json!({
            "name": "Trail Runner",
            "sku": "TR-100",
            "brand": "Peakline",
            "price": 89.0,
            "description": "A lightweight trail running shoe with a grippy outsole.",
            "images": ["https://cdn.example.com/tr-100.jpg"],
            "categories": ["Footwear"],
            "faq": [{"question": "Waterproof?", "answer": "No."}],
            "variants": [{
                "sku": "TR-100-42",
                "price": 89.0,
                "option_values": [{"option_name": "Size", "value": "42"}]
            }]
        }))
        .unwrap();
        assert_eq!(record.sku, Sku::from("TR-100"));
        let variants = record.variants.unwrap();
        assert_eq!(variants[0].option_values[0].option_name, "Size");
        assert!(variants[0].image_url.is_none());
        assert!(record.meta_title.is_none());
    }

    #[test]
    fn missing_required_field_fails_typed_deserialization() {
        let result: Result<ProductRecord, _> = serde_json::from_value(json!({
            "name": "Trail Runner",
            "sku": "TR-100"
        }));
        assert!(result.is_err());
    }
}
