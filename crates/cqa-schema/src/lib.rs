//! # cqa-schema: Record Schema & Structural Validation
//!
//! The record schema is a pair of portable JSON Schema documents
//! (Draft 2020-12) in the repository's `schemas/` directory, versioned and
//! audited independently of this crate. They are also bundled into the
//! crate so a validator can be built without filesystem access.
//!
//! ## Structural Validation (`validate`)
//!
//! - [`SchemaRegistry`] loads every `*.schema.json` document and resolves
//!   cross-schema `$ref` URIs locally.
//! - [`RecordSchema`] is one compiled schema, built once and shared.
//! - [`validate_structure`] reports every violation of a raw record in a
//!   single pass; [`narrow`] additionally converts the record into a
//!   [`RawRecord`](cqa_core::RawRecord).
//!
//! ## Field Order (`contract`)
//!
//! Structural errors are reported in the schema's declaration order, which
//! [`contract`] records as [`FIELD_ORDER`].
//!
//! ## Crate Policy
//!
//! - Depends only on `cqa-core` internally.
//! - Schema `$id` and `$ref` URIs must never be changed without verifying
//!   all references across the repository.
//! - Schema problems (unreadable file, invalid schema) are
//!   [`SchemaValidationError`]s. Record problems are never errors.

pub mod contract;
pub mod validate;

pub use contract::{order_key, product_fields, FIELD_ORDER, PRODUCT_SCHEMA, VARIANT_SCHEMA};
pub use validate::{narrow, validate_structure, RecordSchema, SchemaRegistry, SchemaValidationError};
