//! # cqa-policy: Content Policy Rule Engine
//!
//! Evaluates operator-configurable business rules against a product record.
//! The rules are independent of the record schema: SEO limits here are
//! re-checked against configured values so policy can be tightened or
//! loosened without touching the schema.
//!
//! ## Rule Families
//!
//! Evaluated unconditionally, results in this order:
//!
//! 1. Regulatory disclaimer for supplement and medical categories (`Content`).
//! 2. Banned phrases in the description text, one error per phrase (`Content`).
//! 3. Meta title length, then meta description length (`SEO`).
//! 4. Minimum image count (`Images`).
//!
//! ## Configuration
//!
//! [`RuleConfiguration`] enumerates every recognized key and requires all of
//! them. A missing key fails at load time with [`RuleConfigError`], so the
//! engine itself never checks whether a rule is configured.

pub mod config;
pub mod engine;

pub use config::{ImageRules, RuleConfigError, RuleConfiguration, SeoRules, REQUIRED_KEYS};
pub use engine::{validate_content, REGULATED_CATEGORY_MARKERS};
