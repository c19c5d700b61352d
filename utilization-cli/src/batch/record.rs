//! Typed view of one spreadsheet row

use std::collections::BTreeMap;

use super::channel::Channel;
use super::dataset::{Cell, Row};
use crate::api::models::{MediaUtilization, UtilizationPayload};
use crate::error::ValidationError;

/// Capacity settings read for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSettings {
    pub max_capacity: u32,
    /// Deduplicated, in the order they were listed
    pub interruptable_media_types: Vec<String>,
}

/// One validated input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilizationRecord {
    pub email: String,
    pub channels: BTreeMap<Channel, ChannelSettings>,
}

impl UtilizationRecord {
    /// Validate a row. Fails on the first unusable column, in channel order.
    pub fn from_row(row: &Row) -> Result<Self, ValidationError> {
        let email = row.email()?;

        let mut channels = BTreeMap::new();
        for channel in Channel::ALL {
            let settings = ChannelSettings {
                max_capacity: parse_capacity(row, &channel.capacity_column())?,
                interruptable_media_types: parse_media_types(row, &channel.media_types_column()),
            };
            channels.insert(channel, settings);
        }

        Ok(Self { email, channels })
    }

    pub fn to_payload(&self) -> UtilizationPayload {
        let utilization = self
            .channels
            .iter()
            .map(|(channel, settings)| {
                (
                    *channel,
                    MediaUtilization {
                        maximum_capacity: settings.max_capacity,
                        interruptable_media_types: settings.interruptable_media_types.clone(),
                        include_non_acd: channel.include_non_acd(),
                    },
                )
            })
            .collect();

        UtilizationPayload { utilization }
    }
}

fn parse_capacity(row: &Row, column: &str) -> Result<u32, ValidationError> {
    let cell = row
        .get(column)
        .ok_or_else(|| ValidationError::new(column, "column is missing"))?;

    match cell {
        Cell::Int(value) => to_capacity(column, *value),
        Cell::Float(value) if value.is_finite() && value.fract() == 0.0 => {
            to_capacity(column, *value as i64)
        }
        Cell::Text(s) if !s.trim().is_empty() => {
            let trimmed = s.trim();
            let value = trimmed.parse::<i64>().map_err(|_| {
                ValidationError::new(column, format!("'{}' is not an integer", trimmed))
            })?;
            to_capacity(column, value)
        }
        Cell::Empty | Cell::Text(_) => Err(ValidationError::new(column, "missing value")),
        other => Err(ValidationError::new(
            column,
            format!("'{}' is not an integer", other),
        )),
    }
}

fn to_capacity(column: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| {
        ValidationError::new(
            column,
            format!("{} is not a valid capacity (expected a non-negative integer)", value),
        )
    })
}

/// Comma-separated tags. Blank or absent means "none", never an error.
fn parse_media_types(row: &Row, column: &str) -> Vec<String> {
    let Some(raw) = row.text(column) else {
        return Vec::new();
    };

    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
