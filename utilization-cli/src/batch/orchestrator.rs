//! Batch orchestration: resolve → transform → dispatch for every row
//!
//! Per-row faults never leave this module; they become outcome records.
//! The only early exit is a failed token exchange, before any row runs.

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::dataset::{Dataset, Row};
use super::outcome::{BatchReport, Outcome, OutcomeRecord};
use super::transform::transform;
use crate::api::{Credentials, PlatformClient, TokenInfo};
use crate::error::BatchFatal;

/// Everything a row needs, built once per batch run
#[derive(Debug, Clone, Copy)]
pub struct BatchContext<'a> {
    pub client: &'a PlatformClient,
    pub token: &'a TokenInfo,
}

impl BatchContext<'_> {
    /// Drive one row to a terminal state. Never fails.
    pub async fn process_row(&self, row: &Row) -> OutcomeRecord {
        let record = |email: String, outcome: Outcome| OutcomeRecord {
            line: row.line,
            email,
            outcome,
        };

        let email = match row.email() {
            Ok(email) => email,
            Err(err) => {
                warn!("Line {}: {}", row.line, err);
                return record(String::new(), Outcome::Invalid(err));
            }
        };

        let user_id = match self.client.find_user_id_by_email(self.token, &email).await {
            Ok(Some(user_id)) => user_id,
            Ok(None) => {
                warn!("Line {}: no user found for {}", row.line, email);
                return record(email, Outcome::NotFound);
            }
            Err(err) => {
                warn!("Line {}: user search for {} failed: {}", row.line, email, err);
                return record(email, Outcome::ResolveFailed(err));
            }
        };

        let payload = match transform(row) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Line {}: invalid row for {}: {}", row.line, email, err);
                return record(email, Outcome::Invalid(err));
            }
        };

        match self
            .client
            .update_utilization(self.token, &user_id, &payload)
            .await
        {
            Ok(()) => {
                debug!("Line {}: updated utilization for {} ({})", row.line, email, user_id);
                record(email, Outcome::Updated { user_id })
            }
            Err(err) => {
                warn!("Line {}: update for {} failed: {}", row.line, email, err);
                if err.status() == Some(401) && self.token.is_expired() {
                    warn!("Access token has expired; remaining rows will be rejected");
                }
                record(email, Outcome::UpdateFailed(err))
            }
        }
    }
}

/// Runs utilization batches against one platform with one set of credentials
#[derive(Debug, Clone)]
pub struct BatchRunner {
    client: PlatformClient,
    credentials: Credentials,
    workers: usize,
}

impl BatchRunner {
    /// `workers` rows are processed concurrently; 1 keeps the run sequential
    pub fn new(client: PlatformClient, credentials: Credentials, workers: usize) -> Self {
        Self {
            client,
            credentials,
            workers: workers.max(1),
        }
    }

    /// Process every row exactly once and return the outcomes in input order.
    ///
    /// Cancellation is honoured between rows: rows already started finish,
    /// no further row is started, and the report is flagged `cancelled`.
    pub async fn run(
        &self,
        dataset: &Dataset,
        cancel: &CancellationToken,
    ) -> Result<BatchReport, BatchFatal> {
        info!(
            "Starting utilization batch: {} row(s), {} worker(s)",
            dataset.len(),
            self.workers
        );

        let token = self
            .client
            .obtain_token(&self.credentials)
            .await
            .inspect_err(|e| error!("Failed to get OAuth token: {}", e))?;

        let ctx = BatchContext {
            client: &self.client,
            token: &token,
        };
        let started = Instant::now();

        // `buffered` keeps at most `workers` rows in flight and yields them in input order
        let outcomes: Vec<OutcomeRecord> = stream::iter(dataset.rows.iter())
            .take_until(cancel.cancelled())
            .map(|row| ctx.process_row(row))
            .buffered(self.workers)
            .collect()
            .await;

        let report = BatchReport {
            cancelled: outcomes.len() < dataset.len(),
            outcomes,
        };

        if report.cancelled {
            warn!(
                "Batch cancelled after {} of {} row(s)",
                report.len(),
                dataset.len()
            );
        }

        if token.is_expired() {
            warn!(
                "Batch ran for {:?}, longer than the token lifetime of {}s; late rows may have failed with 401",
                started.elapsed(),
                token.expires_in.unwrap_or_default()
            );
        }

        info!("Batch finished in {:?}: {}", started.elapsed(), report.summary());
        Ok(report)
    }
}
