//! # cqa-pipeline: Validation Orchestrator
//!
//! The public entry point of catalog QA. [`validate_product`] runs the three
//! independent checkers in a fixed order and concatenates their findings:
//!
//! 1. Structural validation against the record schema (`cqa-schema`).
//! 2. Content, SEO and image policy (`cqa-policy`).
//! 3. Platform ingestion constraints (`cqa-platform`).
//!
//! Stages 2 and 3 always run, on the typed record when the schema passed
//! and on a best-effort view otherwise. An empty report means the record may
//! be published.
//!
//! Setup problems (unreadable schemas, incomplete rule configuration) are
//! [`PipelineError`]s raised while building a [`CatalogValidator`], before
//! any record is seen.

pub mod pipeline;

pub use pipeline::{validate_product, CatalogValidator, PipelineError};
