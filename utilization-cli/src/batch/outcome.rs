//! Per-row outcomes and the batch report

use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;

use crate::error::{ApiError, ValidationError};

/// Terminal state of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated { user_id: String },
    NotFound,
    /// Directory search failed; reported like a missing user
    ResolveFailed(ApiError),
    Invalid(ValidationError),
    UpdateFailed(ApiError),
}

/// One line of the outcome log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    /// Line in the source sheet
    pub line: usize,
    pub email: String,
    pub outcome: Outcome,
}

impl OutcomeRecord {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Updated { .. })
    }

    /// Short machine-friendly status for reports
    pub fn status(&self) -> &'static str {
        match self.outcome {
            Outcome::Updated { .. } => "updated",
            Outcome::NotFound => "not_found",
            Outcome::ResolveFailed(_) => "resolve_failed",
            Outcome::Invalid(_) => "invalid",
            Outcome::UpdateFailed(_) => "failed",
        }
    }
}

impl std::fmt::Display for OutcomeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let email = &self.email;
        match &self.outcome {
            Outcome::Updated { .. } => {
                write!(f, "Updated utilization for user with email {}", email)
            }
            Outcome::NotFound | Outcome::ResolveFailed(_) => {
                write!(f, "User ID not found for email {}", email)
            }
            Outcome::Invalid(err) if email.is_empty() => {
                write!(f, "Invalid utilization data on line {}: {}", self.line, err)
            }
            Outcome::Invalid(err) => {
                write!(f, "Invalid utilization data for user with email {}: {}", email, err)
            }
            Outcome::UpdateFailed(err) => write!(
                f,
                "Failed to update utilization for user with email {}: {}",
                email, err
            ),
        }
    }
}

/// Counts per terminal state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub updated: usize,
    pub not_found: usize,
    pub invalid: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.updated + self.not_found + self.invalid + self.failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} updated, {} not found, {} invalid, {} failed",
            self.updated, self.not_found, self.invalid, self.failed
        )
    }
}

/// Ordered outcome log of one batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<OutcomeRecord>,
    /// Set when cancellation stopped the run before every row was started
    pub cancelled: bool,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome lines in input order
    #[cfg(test)]
    pub fn messages(&self) -> Vec<String> {
        self.outcomes.iter().map(|o| o.to_string()).collect()
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for record in &self.outcomes {
            match record.outcome {
                Outcome::Updated { .. } => summary.updated += 1,
                Outcome::NotFound | Outcome::ResolveFailed(_) => summary.not_found += 1,
                Outcome::Invalid(_) => summary.invalid += 1,
                Outcome::UpdateFailed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Write `line,email,status,message` rows to a CSV file
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut wtr = Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        wtr.write_record(["line", "email", "status", "message"])
            .context("Failed to write CSV header")?;

        for record in &self.outcomes {
            wtr.write_record([
                record.line.to_string(),
                record.email.clone(),
                record.status().to_string(),
                record.to_string(),
            ])
            .with_context(|| format!("Failed to write outcome for line {}", record.line))?;
        }

        wtr.flush().context("Failed to flush CSV writer")?;

        log::info!("Outcome report written to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: Outcome) -> OutcomeRecord {
        OutcomeRecord {
            line: 2,
            email: "a@x.com".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            record(Outcome::Updated {
                user_id: "u-1".to_string()
            })
            .to_string(),
            "Updated utilization for user with email a@x.com"
        );
        assert_eq!(
            record(Outcome::NotFound).to_string(),
            "User ID not found for email a@x.com"
        );
        assert_eq!(
            record(Outcome::UpdateFailed(ApiError::Status {
                status: 403,
                body: "forbidden".to_string(),
                retry_after: None
            }))
            .to_string(),
            "Failed to update utilization for user with email a@x.com: 403, forbidden"
        );
    }

    #[test]
    fn test_resolve_failure_reads_as_not_found() {
        let failed = record(Outcome::ResolveFailed(ApiError::Status {
            status: 500,
            body: "boom".to_string(),
            retry_after: None,
        }));
        assert_eq!(failed.to_string(), "User ID not found for email a@x.com");
        assert_eq!(failed.status(), "resolve_failed");
    }

    #[test]
    fn test_invalid_names_column() {
        let invalid = record(Outcome::Invalid(ValidationError::new(
            "Chat Maximum Capacity",
            "missing value",
        )));
        assert_eq!(
            invalid.to_string(),
            "Invalid utilization data for user with email a@x.com: Chat Maximum Capacity: missing value"
        );
    }

    #[test]
    fn test_invalid_without_email_names_line() {
        let invalid = OutcomeRecord {
            line: 7,
            email: String::new(),
            outcome: Outcome::Invalid(ValidationError::new("Email Address", "missing value")),
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid utilization data on line 7: Email Address: missing value"
        );
    }

    #[test]
    fn test_summary_counts() {
        let report = BatchReport {
            outcomes: vec![
                record(Outcome::Updated {
                    user_id: "u-1".to_string(),
                }),
                record(Outcome::NotFound),
                record(Outcome::ResolveFailed(ApiError::Decode("eof".to_string()))),
                record(Outcome::Invalid(ValidationError::new("Email Address", "missing value"))),
                record(Outcome::UpdateFailed(ApiError::Status {
                    status: 400,
                    body: "bad".to_string(),
                    retry_after: None,
                })),
            ],
            cancelled: false,
        };

        let summary = report.summary();
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.not_found, 2);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), report.len());
    }

    #[test]
    fn test_write_csv_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let report = BatchReport {
            outcomes: vec![record(Outcome::NotFound)],
            cancelled: false,
        };

        report.write_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("line,email,status,message"));
        assert_eq!(
            lines.next(),
            Some("2,a@x.com,not_found,User ID not found for email a@x.com")
        );
    }
}
