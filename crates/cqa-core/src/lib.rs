//! # cqa-core: Foundational Types for Catalog QA
//!
//! Defines the product record model and the validation report types that
//! every other crate in the workspace shares. It depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Raw input is narrowed exactly once.** A candidate record arrives as
//!    an untyped `serde_json::Value`. The structural validator narrows it
//!    into a [`RawRecord`]: either a fully typed [`ProductRecord`] or a
//!    best-effort [`PartialRecord`]. Later stages only see [`RecordView`].
//!
//! 2. **Data defects are values.** Every defect in a product record is a
//!    [`ValidationError`] in a [`ValidationReport`]. `Err` is reserved for
//!    setup failures such as an unreadable document.
//!
//! 3. **`Sku` newtype.** Stock-keeping units are never bare strings in the
//!    typed model.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cqa-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod identity;
pub mod record;
pub mod report;
pub mod view;

// Re-export primary types for ergonomic imports.
pub use document::{load_document, parse_document, yaml_to_json_value, DocumentFormat};
pub use error::DocumentError;
pub use identity::Sku;
pub use record::{FaqItem, OptionValue, ProductRecord, Variant};
pub use report::{ErrorCategory, FieldPath, PathToken, ValidationError, ValidationReport};
pub use view::{PartialRecord, PartialVariant, RawRecord, RecordView, VariantView};
