//! # Policy Evaluation
//!
//! Runs every rule family against a record view. Missing record fields are
//! treated as absent or empty, so the engine is safe to run on records that
//! failed structural validation.

use cqa_core::{RecordView, ValidationError};

use crate::config::RuleConfiguration;

/// Lower-case substrings marking a category as regulated.
pub const REGULATED_CATEGORY_MARKERS: &[&str] = &["supplement", "medical"];

/// Evaluate all content, SEO and image rules.
///
/// Every rule family runs; results are ordered disclaimer, banned phrases
/// (in configured order), meta title, meta description, images.
pub fn validate_content<R>(record: &R, rules: &RuleConfiguration) -> Vec<ValidationError>
where
    R: RecordView + ?Sized,
{
    let mut errors = Vec::new();
    check_disclaimer(record, rules, &mut errors);
    check_banned_phrases(record, rules, &mut errors);
    check_seo(record, rules, &mut errors);
    check_images(record, rules, &mut errors);
    errors
}

fn regulated_category<R: RecordView + ?Sized>(record: &R) -> Option<&str> {
    record
        .categories()
        .iter()
        .find(|category| {
            let lower = category.to_lowercase();
            REGULATED_CATEGORY_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(String::as_str)
}

fn check_disclaimer<R: RecordView + ?Sized>(
    record: &R,
    rules: &RuleConfiguration,
    errors: &mut Vec<ValidationError>,
) {
    let required = rules.required_disclaimer.as_str();
    if required.is_empty() {
        return;
    }
    let Some(category) = regulated_category(record) else {
        return;
    };
    let disclaimer = record.regulatory_disclaimer().unwrap_or_default();
    if !disclaimer.contains(required) {
        errors.push(ValidationError::content(format!(
            "missing required regulatory disclaimer \"{required}\" for regulated category \"{category}\""
        )));
    }
}

fn check_banned_phrases<R: RecordView + ?Sized>(
    record: &R,
    rules: &RuleConfiguration,
    errors: &mut Vec<ValidationError>,
) {
    // The two fields are always joined by one space, so a phrase can span
    // the boundary between them.
    let haystack = format!(
        "{} {}",
        record.description().unwrap_or_default(),
        record.short_description().unwrap_or_default()
    )
    .to_lowercase();

    for phrase in &rules.banned_phrases {
        if haystack.contains(&phrase.to_lowercase()) {
            errors.push(ValidationError::content(format!(
                "banned phrase detected: \"{phrase}\""
            )));
        }
    }
}

fn check_seo<R: RecordView + ?Sized>(
    record: &R,
    rules: &RuleConfiguration,
    errors: &mut Vec<ValidationError>,
) {
    let fields = [
        ("meta_title", record.meta_title(), rules.seo.title_max),
        ("meta_description", record.meta_description(), rules.seo.description_max),
    ];
    for (field, value, max) in fields {
        let Some(text) = value else { continue };
        let len = text.chars().count();
        if len > max {
            errors.push(ValidationError::seo(format!(
                "{field} is {len} characters, exceeding the maximum of {max}"
            )));
        }
    }
}

fn check_images<R: RecordView + ?Sized>(
    record: &R,
    rules: &RuleConfiguration,
    errors: &mut Vec<ValidationError>,
) {
    let count = record.image_count();
    let min = rules.images.min_count;
    if count < min {
        errors.push(ValidationError::images(format!(
            "{count} image(s) provided, at least {min} required"
        )));
    }
}
