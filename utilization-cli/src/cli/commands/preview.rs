//! Preview command: show how a sheet will be read, without network access

use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::api::UtilizationPayload;
use crate::batch::{Channel, PlannedUpdate, expected_columns, plan};
use crate::sheet::read_dataset;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Sheet to inspect (.xlsx, .xls, .ods or .csv)
    pub file: PathBuf,
}

/// Handle the preview command
pub fn handle_preview_command(args: PreviewArgs) -> Result<()> {
    let dataset = read_dataset(&args.file)?;

    println!(
        "{} {} ({} row(s))",
        "Sheet:".bold(),
        args.file.display().to_string().cyan(),
        dataset.len()
    );

    let missing = dataset.missing_columns(&expected_columns());
    if !missing.is_empty() {
        println!("{}", "Missing columns:".yellow().bold());
        for column in &missing {
            println!("  - {}", column.yellow());
        }
    }

    let duplicates = dataset.duplicate_emails();
    if !duplicates.is_empty() {
        println!(
            "{} {}",
            "Listed more than once:".yellow().bold(),
            duplicates.join(", ")
        );
    }

    println!();

    let planned = plan(&dataset);
    let mut valid = 0;
    for update in &planned {
        if update.payload.is_ok() {
            valid += 1;
        }
        for line in describe(update) {
            println!("{}", line);
        }
    }

    println!();
    println!(
        "{} {} valid, {} invalid",
        "Rows:".bold(),
        valid.to_string().green(),
        (planned.len() - valid).to_string().red()
    );

    Ok(())
}

fn describe(update: &PlannedUpdate) -> Vec<String> {
    let email = if update.email.is_empty() {
        "<no email>".to_string()
    } else {
        update.email.clone()
    };
    let header = format!("Line {}: {}", update.line, email);

    match &update.payload {
        Ok(payload) => {
            let mut lines = vec![header];
            lines.extend(channel_lines(payload));
            lines
        }
        Err(err) => vec![format!("{} {}", header, format!("invalid ({})", err).red())],
    }
}

fn channel_lines(payload: &UtilizationPayload) -> Vec<String> {
    Channel::ALL
        .iter()
        .filter_map(|channel| {
            payload.get(*channel).map(|media| {
                let interrupts = if media.interruptable_media_types.is_empty() {
                    "-".to_string()
                } else {
                    media.interruptable_media_types.join(", ")
                };
                format!(
                    "  {:<9} capacity {:<3} interruptible by {}",
                    channel.label(),
                    media.maximum_capacity,
                    interrupts
                )
            })
        })
        .collect()
}
