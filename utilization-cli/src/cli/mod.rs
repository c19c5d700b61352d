//! Command-line interface definitions

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bulk-update Genesys Cloud routing utilization from a spreadsheet
#[derive(Parser, Debug)]
#[command(name = "utilization-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (TOML, or legacy config.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the utilization settings of every row in a sheet
    Apply(commands::apply::ApplyArgs),

    /// Show how each row of a sheet would be interpreted
    Preview(commands::preview::PreviewArgs),

    /// Write an empty sheet with the expected columns
    Template(commands::template::TemplateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply_with_options() {
        let cli = Cli::try_parse_from([
            "utilization-cli",
            "--config",
            "config.json",
            "apply",
            "agents.xlsx",
            "--workers",
            "4",
            "--retries",
            "2",
            "--report",
            "out.csv",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("config.json")));
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.file, PathBuf::from("agents.xlsx"));
                assert_eq!(args.workers, Some(4));
                assert_eq!(args.retries, Some(2));
                assert_eq!(args.report, Some(PathBuf::from("out.csv")));
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = Cli::try_parse_from(["utilization-cli", "apply", "a.xlsx", "--workers", "0"]);
        assert!(result.is_err());
    }
}
