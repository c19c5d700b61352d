//! Write an empty utilization sheet with the expected headers

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use crate::batch::expected_columns;

const SHEET_NAME: &str = "Utilization";

/// Write a template workbook, optionally with one example row
pub fn write_template<P: AsRef<Path>>(path: P, with_example: bool) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(SHEET_NAME)?;
    write_header(worksheet)?;
    if with_example {
        write_example_row(worksheet)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Template written to: {}", path.display());
    Ok(())
}

fn write_header(ws: &mut Worksheet) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, header) in expected_columns().iter().enumerate() {
        let col = col as u16;
        ws.write_string_with_format(0, col, header, &bold)?;
        ws.set_column_width(col, (header.len() + 2) as f64)?;
    }
    Ok(())
}

fn write_example_row(ws: &mut Worksheet) -> Result<()> {
    ws.write_string(1, 0, "agent@example.com")?;
    // Capacity / media-type pairs per channel, workitem last
    let example: [(u32, &str); 6] = [
        (1, ""),
        (3, "call"),
        (1, ""),
        (1, "call"),
        (1, ""),
        (2, ""),
    ];
    for (idx, (capacity, media)) in example.iter().enumerate() {
        let col = 1 + (idx as u16) * 2;
        ws.write_number(1, col, *capacity)?;
        if !media.is_empty() {
            ws.write_string(1, col + 1, *media)?;
        }
    }
    Ok(())
}
