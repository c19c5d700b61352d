//! Row → utilization payload transformation
//!
//! Pure: no I/O, same row in gives the same payload out.

use super::dataset::{Dataset, Row};
use super::record::UtilizationRecord;
use crate::api::models::UtilizationPayload;
use crate::error::ValidationError;

/// Turn one row into the payload sent to the utilization endpoint.
pub fn transform(row: &Row) -> Result<UtilizationPayload, ValidationError> {
    UtilizationRecord::from_row(row).map(|record| record.to_payload())
}

/// What a row would send, without touching the remote platform
#[derive(Debug, Clone)]
pub struct PlannedUpdate {
    pub line: usize,
    /// Raw email cell text; empty when the cell is blank
    pub email: String,
    pub payload: Result<UtilizationPayload, ValidationError>,
}

/// Transform every row of a dataset, keeping input order.
pub fn plan(dataset: &Dataset) -> Vec<PlannedUpdate> {
    dataset
        .rows
        .iter()
        .map(|row| PlannedUpdate {
            line: row.line,
            email: row.email().unwrap_or_default(),
            payload: transform(row),
        })
        .collect()
}
