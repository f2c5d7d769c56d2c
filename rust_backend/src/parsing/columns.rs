//! Heuristic column detection for tables with unfamiliar headers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::domain::SessionDate;
use crate::parsing::fields;
use crate::parsing::table::{CellValue, ColumnMap, RawTable};

/// How many leading non-empty values of a column the probes inspect.
const PROBE_DEPTH: usize = 10;

/// How many time-shaped values a column needs before it counts as a
/// time column.
const TIME_HITS_NEEDED: usize = 3;

static TIME_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid time shape pattern"));

/// Column names proposed by [`detect_columns`], one per logical field.
///
/// Every field is optional; detection reports what it found and the
/// caller decides whether a partial proposal is usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedColumns {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub group: Option<String>,
    pub room: Option<String>,
    pub description: Option<String>,
    pub teachers: Option<String>,
}

impl DetectedColumns {
    /// Turns a complete proposal into a [`ColumnMap`]; `None` when any
    /// field is still missing.
    pub fn into_column_map(self) -> Option<ColumnMap> {
        Some(ColumnMap {
            date: self.date?,
            start: self.start?,
            end: self.end?,
            group: self.group?,
            room: self.room?,
            description: self.description?,
            teachers: self.teachers?,
        })
    }
}

/// Proposes a column mapping by probing cell contents and header names.
///
/// The date column is the first whose leading values contain a parseable
/// date. Time columns need at least three values shaped like `9:05`; the
/// first such column becomes the start, the second the end. The remaining
/// fields go by the header substrings the schedule exports use. Detection
/// never fails; absent fields simply stay `None`.
pub fn detect_columns(table: &RawTable) -> DetectedColumns {
    let mut detected = DetectedColumns::default();

    for (idx, header) in table.headers().iter().enumerate() {
        let sample = column_sample(table, idx);

        if detected.date.is_none() && looks_like_dates(&sample) {
            detected.date = Some(header.clone());
            continue;
        }

        if looks_like_times(&sample) {
            if detected.start.is_none() {
                detected.start = Some(header.clone());
                continue;
            }
            if detected.end.is_none() {
                detected.end = Some(header.clone());
                continue;
            }
        }

        let lower = header.to_lowercase();
        if detected.group.is_none() && lower.contains("groep") {
            detected.group = Some(header.clone());
        } else if detected.room.is_none() && lower.contains("zaal") {
            detected.room = Some(header.clone());
        } else if detected.description.is_none() && lower.contains("beschrijving") {
            detected.description = Some(header.clone());
        } else if detected.teachers.is_none() && lower.contains("docent") {
            detected.teachers = Some(header.clone());
        }
    }

    detected
}

fn column_sample<'a>(table: &'a RawTable, idx: usize) -> Vec<&'a CellValue> {
    table
        .rows()
        .iter()
        .map(|row| &row[idx])
        .filter(|cell| !cell.is_empty())
        .take(PROBE_DEPTH)
        .collect()
}

fn looks_like_dates(sample: &[&CellValue]) -> bool {
    sample
        .iter()
        .any(|cell| fields::parse_date(cell) != SessionDate::Unknown)
}

fn looks_like_times(sample: &[&CellValue]) -> bool {
    let hits = sample
        .iter()
        .filter(|cell| match cell {
            CellValue::Time(_) => true,
            CellValue::Text(s) => TIME_SHAPE.is_match(s.trim()),
            _ => false,
        })
        .count();

    hits >= TIME_HITS_NEEDED
}
