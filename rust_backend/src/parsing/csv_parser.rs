use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::parsing::table::{CellValue, RawTable};

/// Parse a CSV schedule export into a raw table.
///
/// The first record is the header. Every cell stays textual; date and
/// time recognition happens later in the field normalizers, which accept
/// the string forms spreadsheet exports produce.
pub fn parse_schedule_csv(csv_path: &Path) -> Result<RawTable> {
    let content = std::fs::read_to_string(csv_path)
        .with_context(|| format!("Failed to read CSV file: {}", csv_path.display()))?;

    parse_schedule_csv_str(&content)
}

/// Parse schedule CSV from a string.
pub fn parse_schedule_csv_str(csv_str: &str) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_str.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header record")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Failed to read CSV record {}", idx))?;
        rows.push(record.iter().map(cell_from_field).collect());
    }

    Ok(RawTable::new(headers, rows))
}

fn cell_from_field(field: &str) -> CellValue {
    if field.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}
