//! Bulk utilization update pipeline
//!
//! A batch takes a parsed [`Dataset`], resolves each row's email to a user
//! id, turns the row into a [`UtilizationPayload`](crate::api::UtilizationPayload)
//! and applies it, producing one [`OutcomeRecord`] per row in input order.

pub mod channel;
pub mod dataset;
pub mod orchestrator;
pub mod outcome;
pub mod record;
pub mod transform;

pub use channel::Channel;
pub use dataset::{Cell, Dataset, expected_columns};
pub use orchestrator::BatchRunner;
pub use outcome::{BatchReport, Outcome, OutcomeRecord};
pub use transform::{PlannedUpdate, plan};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::dataset::{Cell, Dataset, EMAIL_COLUMN, Row, expected_columns};
    use super::Channel;

    /// A complete, valid row with the given capacities in channel order
    pub fn full_row(email: &str, capacities: [u32; 6]) -> Row {
        let mut row = Row::new(2).with_cell(EMAIL_COLUMN, Cell::Text(email.to_string()));
        for (channel, capacity) in Channel::ALL.into_iter().zip(capacities) {
            row.insert(channel.capacity_column(), Cell::Int(capacity as i64));
            row.insert(channel.media_types_column(), Cell::Empty);
        }
        row
    }

    pub fn sample_dataset(emails: &[&str]) -> Dataset {
        let rows = emails
            .iter()
            .enumerate()
            .map(|(idx, email)| {
                let mut row = full_row(email, [1, 1, 1, 1, 1, 2]);
                row.line = idx + 2;
                row
            })
            .collect();

        Dataset {
            headers: expected_columns(),
            rows,
        }
    }
}
