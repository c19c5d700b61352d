//! Parsed tabular input handed to the batch
//!
//! Readers for xlsx/csv files live in `crate::sheet`; everything in the
//! batch works on this in-memory shape only.

use std::collections::{HashMap, HashSet};

use super::channel::Channel;
use crate::error::ValidationError;

/// Header of the identity column
pub const EMAIL_COLUMN: &str = "Email Address";

/// Every column a utilization sheet is expected to carry, in template order
pub fn expected_columns() -> Vec<String> {
    let mut columns = vec![EMAIL_COLUMN.to_string()];
    for channel in Channel::ALL {
        columns.push(channel.capacity_column());
        columns.push(channel.media_types_column());
    }
    columns
}

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Empty cells and whitespace-only strings
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed textual form, `None` for blank cells
    pub fn as_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(self.to_string().trim().to_string())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(i) => write!(f, "{}", i),
            // Whole floats print without the trailing ".0" spreadsheets add
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{}", *v as i64),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One input record, cells keyed by column header
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line in the source sheet (header is line 1)
    pub line: usize,
    cells: HashMap<String, Cell>,
}

impl Row {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            cells: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_cell(mut self, column: impl Into<String>, cell: Cell) -> Self {
        self.insert(column, cell);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
        self.cells.insert(column.into(), cell);
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(Cell::as_text)
    }

    /// The lookup key of the row
    pub fn email(&self) -> Result<String, ValidationError> {
        self.text(EMAIL_COLUMN)
            .ok_or_else(|| ValidationError::new(EMAIL_COLUMN, "missing value"))
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_blank)
    }
}

/// Ordered rows plus the header line they were read with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from a header row and raw data rows.
    ///
    /// Headers are trimmed, cells beyond the header width are dropped and
    /// fully blank rows are skipped. Line numbers assume the header sits on
    /// line 1.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<Cell>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();

        let rows = records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                let mut row = Row::new(idx + 2);
                for (header, cell) in headers.iter().zip(record) {
                    if header.is_empty() {
                        continue;
                    }
                    row.insert(header.clone(), cell);
                }
                (!row.is_blank()).then_some(row)
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Expected columns that are absent from the header line
    pub fn missing_columns(&self, expected: &[String]) -> Vec<String> {
        expected
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .cloned()
            .collect()
    }

    /// Emails that appear on more than one row, in first-seen order.
    ///
    /// Duplicates are still processed; this only feeds a warning.
    pub fn duplicate_emails(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for email in self.rows.iter().filter_map(|r| r.email().ok()) {
            if !seen.insert(email.clone()) && reported.insert(email.clone()) {
                duplicates.push(email);
            }
        }

        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_from_records_skips_blank_rows_and_keeps_lines() {
        let dataset = Dataset::from_records(
            vec![" Email Address ".to_string(), "Chat Maximum Capacity".to_string()],
            vec![
                vec![text("a@x.com"), Cell::Int(1)],
                vec![Cell::Empty, text("  ")],
                vec![text("b@x.com"), Cell::Float(2.0)],
            ],
        );

        assert_eq!(dataset.headers[0], "Email Address");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[0].line, 2);
        assert_eq!(dataset.rows[1].line, 4);
        assert_eq!(dataset.rows[1].email().unwrap(), "b@x.com");
    }

    #[test]
    fn test_short_records_leave_columns_missing() {
        let dataset = Dataset::from_records(
            vec!["Email Address".to_string(), "Chat Maximum Capacity".to_string()],
            vec![vec![text("a@x.com")]],
        );

        assert!(dataset.rows[0].get("Chat Maximum Capacity").is_none());
    }

    #[test]
    fn test_email_is_trimmed_and_required() {
        let row = Row::new(2).with_cell(EMAIL_COLUMN, text("  a@x.com "));
        assert_eq!(row.email().unwrap(), "a@x.com");

        let blank = Row::new(3).with_cell(EMAIL_COLUMN, text(""));
        let err = blank.email().unwrap_err();
        assert_eq!(err.column, EMAIL_COLUMN);
    }

    #[test]
    fn test_whole_float_cells_render_as_integers() {
        assert_eq!(Cell::Float(3.0).to_string(), "3");
        assert_eq!(Cell::Float(2.5).to_string(), "2.5");
        assert_eq!(Cell::Empty.as_text(), None);
    }

    #[test]
    fn test_duplicate_emails_reported_once() {
        let dataset = Dataset::from_records(
            vec!["Email Address".to_string()],
            vec![
                vec![text("a@x.com")],
                vec![text("b@x.com")],
                vec![text("a@x.com")],
                vec![text("a@x.com")],
            ],
        );

        assert_eq!(dataset.duplicate_emails(), vec!["a@x.com".to_string()]);
    }

    #[test]
    fn test_missing_columns() {
        let dataset = Dataset::from_records(vec!["Email Address".to_string()], vec![]);
        let missing = dataset.missing_columns(&[
            "Email Address".to_string(),
            "Call Maximum Capacity".to_string(),
        ]);
        assert_eq!(missing, vec!["Call Maximum Capacity".to_string()]);
    }
}
