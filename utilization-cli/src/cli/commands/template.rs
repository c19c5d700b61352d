//! Template command: write an empty sheet with the expected headers

use anyhow::{Result, bail};
use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::sheet::write_template;

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Output workbook (.xlsx)
    pub output: PathBuf,

    /// Include one example row
    #[arg(long)]
    pub example: bool,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

/// Handle the template command
pub fn handle_template_command(args: TemplateArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "Output file already exists: {} (use --force to overwrite)",
            args.output.display()
        );
    }

    write_template(&args.output, args.example)?;
    println!(
        "{} {}",
        "Template written to".green(),
        args.output.display().to_string().cyan()
    );
    Ok(())
}
