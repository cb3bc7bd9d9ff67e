//! # cqa-platform: Platform Compatibility Checks
//!
//! Checks the ingestion constraints of the target storefront platform,
//! independently of schema validity and content policy. Only the product
//! SKU and the variant list are inspected.

pub mod compat;

pub use compat::validate_platform;
