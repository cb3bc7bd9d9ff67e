//! # Error Types
//!
//! Failures that happen before validation can begin: a document that
//! cannot be read or parsed. These are setup failures and never appear in
//! a [`ValidationReport`](crate::ValidationReport).

use thiserror::Error;

/// Error loading a JSON or YAML document from disk or from a string.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read document '{path}': {source}")]
    Read {
        /// Path of the document.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON or YAML.
    #[error("invalid {format} in '{path}': {reason}")]
    Parse {
        /// Path of the document, or `<inline>` for string input.
        path: String,
        /// Format the parser expected.
        format: &'static str,
        /// Parser error message.
        reason: String,
    },

    /// YAML content uses a construct that has no JSON equivalent.
    #[error("YAML-to-JSON conversion failed for '{path}': {reason}")]
    Conversion {
        /// Path of the document.
        path: String,
        /// What could not be converted.
        reason: String,
    },
}
