//! Loader-independent table representation and row normalization.
//!
//! All three loaders (XLSX, CSV, JSON) produce the same [`RawTable`], so
//! normalization and everything downstream never cares where the data came
//! from. Normalization turns raw rows into [`Session`] values without
//! reordering or merging them; the row's position in the input table is
//! its identity.

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::core::domain::{Session, SessionDate};
use crate::parsing::fields;
use crate::preprocessing::report::GenerationReport;

/// One raw table cell, the union of what the loaders produce.
///
/// XLSX cells keep their spreadsheet types (dates, times, numbers); CSV
/// and JSON cells arrive as text or numbers. The field normalizers decide
/// what each cell means for a given logical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Renders the cell for the opaque text fields (group, room,
    /// description, teachers).
    ///
    /// Whole numbers render without a decimal point so a numeric group
    /// column reads as "1", not "1.0".
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Date(d) => d.format("%d-%m-%Y").to_string(),
            CellValue::DateTime(dt) => dt.format("%d-%m-%Y %H:%M").to_string(),
            CellValue::Time(t) => t.format("%H:%M").to_string(),
        }
    }
}

/// A loaded table: header names plus rows of cells.
///
/// Rows are padded (or truncated) to the header width at construction, so
/// every resolved column index is valid for every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Index of the column with this exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Maps the seven logical schedule fields onto table column names.
///
/// The defaults are the column names the schedule exports use; a
/// configuration file or the column detector overrides them per table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_date_column")]
    pub date: String,
    #[serde(default = "default_start_column")]
    pub start: String,
    #[serde(default = "default_end_column")]
    pub end: String,
    #[serde(default = "default_group_column")]
    pub group: String,
    #[serde(default = "default_room_column")]
    pub room: String,
    #[serde(default = "default_description_column")]
    pub description: String,
    #[serde(default = "default_teachers_column")]
    pub teachers: String,
}

fn default_date_column() -> String {
    "Datum".to_string()
}

fn default_start_column() -> String {
    "Van".to_string()
}

fn default_end_column() -> String {
    "Tot".to_string()
}

fn default_group_column() -> String {
    "Student groep".to_string()
}

fn default_room_column() -> String {
    "Zaal".to_string()
}

fn default_description_column() -> String {
    "Beschrijving NL".to_string()
}

fn default_teachers_column() -> String {
    "Docenten".to_string()
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: default_date_column(),
            start: default_start_column(),
            end: default_end_column(),
            group: default_group_column(),
            room: default_room_column(),
            description: default_description_column(),
            teachers: default_teachers_column(),
        }
    }
}

/// Column indices of a [`ColumnMap`] resolved against one table.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColumns {
    pub date: usize,
    pub start: usize,
    pub end: usize,
    pub group: usize,
    pub room: usize,
    pub description: usize,
    pub teachers: usize,
}

impl ColumnMap {
    /// Resolves every mapped column name to its index in `table`.
    ///
    /// A missing column is a clean error naming the column, so the caller
    /// can report it without losing the rest of the run.
    pub fn resolve(&self, table: &RawTable) -> Result<ResolvedColumns> {
        let lookup = |field: &str, name: &str| -> Result<usize> {
            match table.column_index(name) {
                Some(idx) => Ok(idx),
                None => bail!("Kolom '{}' ({}) niet gevonden in de tabel", name, field),
            }
        };

        Ok(ResolvedColumns {
            date: lookup("datum", &self.date)?,
            start: lookup("starttijd", &self.start)?,
            end: lookup("eindtijd", &self.end)?,
            group: lookup("studentgroep", &self.group)?,
            room: lookup("zaal", &self.room)?,
            description: lookup("beschrijving", &self.description)?,
            teachers: lookup("docenten", &self.teachers)?,
        })
    }
}

/// Normalizes every table row into a [`Session`], in input order.
///
/// Malformed cells degrade per the field normalizers (unknown date, 00:00
/// time) with warnings on the report; no row is dropped here. Dropping
/// happens later, at calendar-entry construction, where an unknown date
/// actually becomes a problem.
pub fn normalize_table(
    table: &RawTable,
    map: &ColumnMap,
    report: &mut GenerationReport,
) -> Result<Vec<Session>> {
    let cols = map.resolve(table)?;
    let mut sessions = Vec::with_capacity(table.num_rows());

    report.stats.total_rows = table.num_rows();

    for (idx, row) in table.rows().iter().enumerate() {
        let date_cell = &row[cols.date];
        let date = fields::parse_date(date_cell);
        if date == SessionDate::Unknown {
            report.stats.unknown_dates += 1;
            if !date_cell.is_empty() {
                report.add_warning(format!(
                    "Onbekende datum in rij {}: '{}'",
                    idx,
                    date_cell.to_display_string()
                ));
            }
        }

        let session = Session {
            original_index: idx,
            date,
            start_time: fields::parse_time(&row[cols.start], report),
            end_time: fields::parse_time(&row[cols.end], report),
            group: row[cols.group].to_display_string(),
            room: row[cols.room].to_display_string(),
            description: row[cols.description].to_display_string(),
            teachers: fields::split_teachers(&row[cols.teachers].to_display_string()),
        };

        if session.is_shared() {
            report.stats.shared_rows += 1;
        }
        sessions.push(session);
    }

    report.stats.normalized_sessions = sessions.len();
    Ok(sessions)
}
