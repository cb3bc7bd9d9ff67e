//! # Check-Rules Subcommand
//!
//! Loads a rule configuration with the same fail-fast checks the pipeline
//! applies and prints it back as normalized JSON.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use cqa_policy::RuleConfiguration;

/// Arguments for the check-rules subcommand.
#[derive(Args, Debug)]
pub struct CheckRulesArgs {
    /// Rule configuration file.
    pub path: PathBuf,
}

/// Run the check-rules subcommand.
pub fn run_check_rules(args: &CheckRulesArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let rules = RuleConfiguration::load(&args.path)?;
    tracing::info!(
        path = %args.path.display(),
        banned_phrases = rules.banned_phrases.len(),
        "rule configuration is complete"
    );
    serde_json::to_writer_pretty(&mut *out, &rules)?;
    writeln!(out)?;
    Ok(())
}
