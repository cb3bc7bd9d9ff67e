//! # cqa-cli: Catalog QA Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: Validate product record files and print a JSON report
//!   per record
//! - `check-rules`: Load a rule configuration and print it normalized
//!
//! ## Exit Codes
//!
//! - `0`: every record is publishable
//! - `1`: at least one record has a non-empty report
//! - `2`: the pipeline could not be set up (schemas, rules, unreadable input)
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates, writing to a caller-supplied
//!   writer so stdout carries only JSON.

pub mod rules;
pub mod validate;

/// Every record is publishable.
pub const EXIT_PUBLISHABLE: u8 = 0;
/// At least one record must not be published.
pub const EXIT_REJECTED: u8 = 1;
/// The pipeline setup failed.
pub const EXIT_SETUP_FAILURE: u8 = 2;
