//! # cqa CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use cqa_cli::{EXIT_PUBLISHABLE, EXIT_REJECTED, EXIT_SETUP_FAILURE};

/// Catalog QA: validates product records before storefront publication.
#[derive(Parser, Debug)]
#[command(name = "cqa", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate product record files.
    Validate(cqa_cli::validate::ValidateArgs),
    /// Check a rule configuration file.
    CheckRules(cqa_cli::rules::CheckRulesArgs),
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Validate(args) => {
            let summary = cqa_cli::validate::run_validate(&args, &mut stdout)?;
            tracing::info!(
                records = summary.records,
                rejected = summary.rejected,
                "validation finished"
            );
            Ok(if summary.rejected == 0 {
                EXIT_PUBLISHABLE
            } else {
                EXIT_REJECTED
            })
        }
        Commands::CheckRules(args) => {
            cqa_cli::rules::run_check_rules(&args, &mut stdout)?;
            Ok(EXIT_PUBLISHABLE)
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only JSON reports.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "catalog QA setup failed");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_requires_rules_and_records() {
        assert!(Cli::try_parse_from(["cqa", "validate", "record.json"]).is_err());
        assert!(Cli::try_parse_from(["cqa", "validate", "--rules", "rules.yaml"]).is_err());
        let cli = Cli::try_parse_from([
            "cqa", "validate", "--rules", "rules.yaml", "--schema-dir", "schemas", "a.json", "b.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.records.len(), 2);
                assert!(args.schema_dir.is_some());
                assert!(!args.pretty);
            }
            other => panic!("Expected Validate, got: {other:?}"),
        }
    }
}
