use anyhow::{Context, Result};
use calamine::{open_workbook, Data, ExcelDateTime, Reader, Xlsx};
use chrono::{NaiveDateTime, NaiveTime};
use std::path::Path;

use crate::parsing::table::{CellValue, RawTable};

/// Parse the first worksheet of an XLSX file into a raw table.
///
/// The first worksheet row is the header. Spreadsheet cell types are
/// preserved: date-formatted cells become typed date values instead of
/// display text, so the field normalizers can pass them through.
pub fn parse_schedule_xlsx(xlsx_path: &Path) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(xlsx_path)
        .with_context(|| format!("Failed to open XLSX file: {}", xlsx_path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("XLSX workbook has no worksheets")?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read worksheet '{}'", sheet_name))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .with_context(|| format!("Worksheet '{}' is empty", sheet_name))?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let rows: Vec<Vec<CellValue>> = rows_iter
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(e) => CellValue::Text(format!("{:?}", e)),
        Data::DateTime(x) => cell_from_excel_datetime(x),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn cell_from_excel_datetime(x: &ExcelDateTime) -> CellValue {
    match x.as_datetime() {
        Some(dt) => classify_serial(x.as_f64(), dt),
        None => CellValue::Number(x.as_f64()),
    }
}

// Excel stores dates, times, and datetimes all as day counts. A value
// below one carries no date, and a whole value carries no time of day.
fn classify_serial(serial: f64, dt: NaiveDateTime) -> CellValue {
    if serial < 1.0 {
        CellValue::Time(dt.time())
    } else if dt.time() == NaiveTime::MIN {
        CellValue::Date(dt.date())
    } else {
        CellValue::DateTime(dt)
    }
}
