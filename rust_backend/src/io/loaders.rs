//! Roster file loading utilities.
//!
//! Dispatches on the file extension and hands the parsed table back together
//! with its source format and row count.

use anyhow::{Context, Result};
use std::path::Path;

use crate::parsing::csv_parser::parse_schedule_csv;
use crate::parsing::json_parser::parse_schedule_json;
use crate::parsing::xlsx_parser::parse_schedule_xlsx;
use crate::parsing::RawTable;

/// Source format of a loaded roster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSourceType {
    Xlsx,
    Csv,
    Json,
}

/// A parsed roster table plus metadata about where it came from.
#[derive(Debug, Clone)]
pub struct ScheduleLoadResult {
    pub table: RawTable,
    pub source_type: ScheduleSourceType,
    pub num_rows: usize,
}

impl ScheduleLoadResult {
    pub fn new(table: RawTable, source_type: ScheduleSourceType) -> Self {
        let num_rows = table.num_rows();
        Self {
            table,
            source_type,
            num_rows,
        }
    }
}

/// Unified interface for loading roster tables from XLSX, CSV or JSON.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Load a roster file, picking the parser from the file extension.
    pub fn load_from_file(path: &Path) -> Result<ScheduleLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "xlsx" => Self::load_from_xlsx(path),
            "csv" => Self::load_from_csv(path),
            "json" => Self::load_from_json(path),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Load a roster from an Excel workbook.
    pub fn load_from_xlsx(xlsx_path: &Path) -> Result<ScheduleLoadResult> {
        let table = parse_schedule_xlsx(xlsx_path).context("Failed to parse XLSX file")?;

        Ok(ScheduleLoadResult::new(table, ScheduleSourceType::Xlsx))
    }

    /// Load a roster from a CSV file.
    pub fn load_from_csv(csv_path: &Path) -> Result<ScheduleLoadResult> {
        let table = parse_schedule_csv(csv_path).context("Failed to parse CSV file")?;

        Ok(ScheduleLoadResult::new(table, ScheduleSourceType::Csv))
    }

    /// Load a roster from a JSON file.
    pub fn load_from_json(json_path: &Path) -> Result<ScheduleLoadResult> {
        let table = parse_schedule_json(json_path).context("Failed to parse JSON file")?;

        Ok(ScheduleLoadResult::new(table, ScheduleSourceType::Json))
    }
}
