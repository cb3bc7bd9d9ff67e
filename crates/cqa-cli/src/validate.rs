//! # Validate Subcommand
//!
//! Validates one or more product record files (JSON or YAML, one record per
//! file) and writes one JSON line per record:
//!
//! ```json
//! {"record":"tee.json","publishable":false,"errors":[{"category":"Images","message":"..."}]}
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use cqa_core::{load_document, ValidationReport};
use cqa_pipeline::CatalogValidator;
use serde::Serialize;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Product record files.
    #[arg(required = true)]
    pub records: Vec<PathBuf>,

    /// Rule configuration file.
    #[arg(long)]
    pub rules: PathBuf,

    /// Directory of `*.schema.json` files. Defaults to the bundled schemas.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,

    /// Pretty-print each report.
    #[arg(long)]
    pub pretty: bool,
}

/// Totals for one validate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateSummary {
    /// Records validated.
    pub records: usize,
    /// Records with a non-empty report.
    pub rejected: usize,
}

#[derive(Serialize)]
struct RecordOutcome<'a> {
    record: String,
    publishable: bool,
    errors: &'a ValidationReport,
}

/// Run the validate subcommand, writing reports to `out`.
///
/// # Errors
///
/// Fails on any setup problem: unusable schemas or rules, or a record file
/// that cannot be read or parsed. Invalid records are not errors.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> anyhow::Result<ValidateSummary> {
    let validator = CatalogValidator::from_paths(args.schema_dir.as_deref(), &args.rules)
        .context("failed to set up the validation pipeline")?;

    let mut summary = ValidateSummary {
        records: 0,
        rejected: 0,
    };

    for path in &args.records {
        let raw = load_document(path)?;
        let report = validator.validate(&raw);
        tracing::info!(
            record = %path.display(),
            errors = report.len(),
            "record validated"
        );

        summary.records += 1;
        if !report.is_publishable() {
            summary.rejected += 1;
        }

        let outcome = RecordOutcome {
            record: path.display().to_string(),
            publishable: report.is_publishable(),
            errors: &report,
        };
        if args.pretty {
            serde_json::to_writer_pretty(&mut *out, &outcome)?;
        } else {
            serde_json::to_writer(&mut *out, &outcome)?;
        }
        writeln!(out)?;
    }

    Ok(summary)
}
