//! Apply command: run a utilization batch for a sheet

use anyhow::{Context, Result};
use clap::Args;
use clap::builder::RangedU64ValueParser;
use colored::*;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::api::{PlatformClient, ResilienceConfig};
use crate::batch::{
    BatchReport, BatchRunner, Dataset, Outcome, OutcomeRecord, expected_columns, plan,
};
use crate::config::Config;
use crate::sheet::read_dataset;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Sheet to process (.xlsx, .xls, .ods or .csv)
    pub file: PathBuf,

    /// Rows processed concurrently (outcomes keep input order)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub workers: Option<usize>,

    /// Extra attempts for throttled (429), 5xx or timed-out calls
    #[arg(long)]
    pub retries: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, value_parser = RangedU64ValueParser::<u64>::new().range(1..))]
    pub timeout: Option<u64>,

    /// Print the payload for every row without calling the platform
    #[arg(long)]
    pub dry_run: bool,

    /// Also write outcomes to a CSV file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Handle the apply command
pub async fn handle_apply_command(
    args: ApplyArgs,
    config: Config,
    cancel: CancellationToken,
) -> Result<()> {
    let dataset = read_dataset(&args.file)?;
    check_dataset(&dataset);

    if dataset.is_empty() {
        println!("{}", "No rows to process.".yellow());
        return Ok(());
    }

    if args.dry_run {
        return print_dry_run(&dataset);
    }

    config.validate()?;
    let resilience = resilience_for(&config, &args);
    let client = PlatformClient::new(config.endpoints(), &resilience)?;
    let runner = BatchRunner::new(
        client,
        config.credentials.clone(),
        resilience.concurrency.workers,
    );

    let report = runner
        .run(&dataset, &cancel)
        .await
        .context("Utilization batch failed")?;

    print_report(&report);

    if let Some(path) = &args.report {
        report.write_csv(path)?;
        println!("Report written to {}", path.display().to_string().cyan());
    }

    Ok(())
}

/// Config file values with command-line overrides on top
fn resilience_for(config: &Config, args: &ApplyArgs) -> ResilienceConfig {
    let base = ResilienceConfig::from_config(config);

    let mut builder = ResilienceConfig::builder()
        .retry_config(base.retry.clone())
        .workers(args.workers.unwrap_or(base.concurrency.workers))
        .request_timeout(
            args.timeout
                .map(Duration::from_secs)
                .unwrap_or(base.request_timeout),
        );

    if let Some(retries) = args.retries {
        builder = builder.max_attempts(retries.saturating_add(1));
    }

    builder.build()
}

/// Warnings only; the batch still runs every row
fn check_dataset(dataset: &Dataset) {
    let missing = dataset.missing_columns(&expected_columns());
    if !missing.is_empty() {
        warn!("Sheet is missing column(s): {}", missing.join(", "));
    }

    let duplicates = dataset.duplicate_emails();
    if !duplicates.is_empty() {
        warn!(
            "Email(s) listed more than once will be updated once per row: {}",
            duplicates.join(", ")
        );
    }
}

fn print_dry_run(dataset: &Dataset) -> Result<()> {
    for planned in plan(dataset) {
        match &planned.payload {
            Ok(payload) => {
                println!(
                    "{} {}",
                    format!("Line {}:", planned.line).dimmed(),
                    planned.email.bold()
                );
                println!(
                    "{}",
                    serde_json::to_string_pretty(payload).context("Failed to serialize payload")?
                );
            }
            Err(err) => println!(
                "{} {} {}",
                format!("Line {}:", planned.line).dimmed(),
                planned.email.bold(),
                err.to_string().red()
            ),
        }
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    if report.is_empty() {
        println!("{}", "No rows were processed.".yellow());
    }
    for record in &report.outcomes {
        println!("{}", colorize(record));
    }

    let summary = report.summary();
    println!();
    println!(
        "{} {} row(s): {}",
        "Summary:".bold(),
        summary.total(),
        summary
    );

    if report.cancelled {
        println!(
            "{}",
            "Batch was cancelled; rows after the last outcome were not processed.".yellow()
        );
    }
}

fn colorize(record: &OutcomeRecord) -> ColoredString {
    let line = record.to_string();
    if record.is_success() {
        return line.green();
    }
    match record.outcome {
        Outcome::NotFound | Outcome::ResolveFailed(_) => line.yellow(),
        _ => line.red(),
    }
}
