use anyhow::Result;

use crate::core::domain::{OrderedSchedule, Session};
use crate::parsing::table::{normalize_table, ColumnMap, RawTable};
use crate::preprocessing::report::GenerationReport;

/// Result of preprocessing a loaded table.
pub struct PreprocessResult {
    pub schedule: OrderedSchedule,
    pub report: GenerationReport,
}

/// Normalizes a loaded table and orders it chronologically.
///
/// This is the one place the schedule gets sorted. Everything downstream
/// (partitioning, history, series lookups) relies on the order produced
/// here and never re-sorts.
pub fn preprocess_table(table: &RawTable, map: &ColumnMap) -> Result<PreprocessResult> {
    let mut report = GenerationReport::new();

    // Step 1: Normalize raw rows into sessions, in input order
    let sessions = normalize_table(table, map, &mut report)?;

    // Step 2: Sort chronologically
    let schedule = sort_schedule(sessions);

    Ok(PreprocessResult { schedule, report })
}

/// Orders sessions by date, then start time, then description.
///
/// Sessions without a date sort after every dated session. The sort is
/// stable, so rows that tie on all three keys keep their input order.
pub fn sort_schedule(mut sessions: Vec<Session>) -> OrderedSchedule {
    sessions.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start_time.cmp(&b.start_time))
            .then_with(|| a.description.cmp(&b.description))
    });

    OrderedSchedule::from_sorted(sessions)
}
