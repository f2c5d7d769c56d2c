//! Generation front door: roster discovery and per-teacher documents.
//!
//! One call turns a loaded table into one iCalendar document per requested
//! identity. The table is normalized and sorted once; every partition and
//! resolver works from that single ordered schedule. Failures stay
//! contained: a failed teacher is reported and skipped, the other
//! documents are still generated.

use anyhow::{Context, Result};
use std::collections::BTreeSet;

use crate::api::types::{CalendarBundle, GenerateOptions, GeneratedCalendar};
use crate::cache::{document_cache_key, table_fingerprint, CalendarCache};
use crate::core::domain::{CalendarEntry, OrderedSchedule, SHARED_TOKEN};
use crate::parsing::fields::split_teachers;
use crate::parsing::{ColumnMap, RawTable};
use crate::preprocessing::pipeline::preprocess_table;
use crate::preprocessing::report::GenerationReport;
use crate::services::calendar::{build_partition_entries, calendar_document, GenerateError};
use crate::services::partition::{partition_for_teacher, shared_partition};

/// All distinct teacher tokens in the table, lowercased and sorted.
///
/// Includes `"allen"` when present; callers generating per-teacher
/// documents usually filter it out and request it separately.
pub fn collect_teachers(table: &RawTable, map: &ColumnMap) -> Result<Vec<String>> {
    let column = table.column_index(&map.teachers).with_context(|| {
        format!(
            "Kolom '{}' (docenten) niet gevonden in de tabel",
            map.teachers
        )
    })?;

    let mut tokens = BTreeSet::new();
    for row in table.rows() {
        for token in split_teachers(&row[column].to_display_string()) {
            tokens.insert(token.to_lowercase());
        }
    }

    Ok(tokens.into_iter().collect())
}

/// Generates one calendar document per requested identity.
///
/// Equivalent to [`generate_calendars_cached`] with a cache that lives for
/// this call only.
pub fn generate_calendars(
    table: &RawTable,
    map: &ColumnMap,
    teachers: &[String],
    options: &GenerateOptions,
) -> Result<CalendarBundle> {
    let mut cache = CalendarCache::new();
    generate_calendars_cached(table, map, teachers, options, &mut cache)
}

/// Generates calendars, reusing documents cached from earlier runs.
///
/// Cache keys cover everything that influences the output (table
/// fingerprint, column mapping, options), so a hit is always byte-correct.
/// The shared partition's entries are built at most once per run and
/// reused for every document that appends them.
pub fn generate_calendars_cached(
    table: &RawTable,
    map: &ColumnMap,
    teachers: &[String],
    options: &GenerateOptions,
    cache: &mut CalendarCache,
) -> Result<CalendarBundle> {
    let preprocessed = preprocess_table(table, map)?;
    let schedule = preprocessed.schedule;
    let mut report = preprocessed.report;

    let fingerprint = table_fingerprint(table)?;

    let shared = shared_partition(&schedule, &options.shared_inclusion);
    report.stats.shared_included = shared.len();

    let needs_shared = options.include_shared
        || teachers.iter().any(|t| t.to_lowercase() == SHARED_TOKEN);
    let shared_entries = if needs_shared {
        build_partition_entries(&shared, &schedule, &mut report)
    } else {
        Vec::new()
    };

    let mut calendars = Vec::with_capacity(teachers.len());
    for teacher in teachers {
        let generated = generate_one(
            teacher,
            &schedule,
            &shared_entries,
            options,
            &fingerprint,
            map,
            cache,
            &mut report,
        );
        match generated {
            Ok(calendar) => calendars.push(calendar),
            Err(err) => report.add_error(err.to_string()),
        }
    }

    Ok(CalendarBundle { calendars, report })
}

#[allow(clippy::too_many_arguments)]
fn generate_one(
    teacher: &str,
    schedule: &OrderedSchedule,
    shared_entries: &[CalendarEntry],
    options: &GenerateOptions,
    fingerprint: &str,
    map: &ColumnMap,
    cache: &mut CalendarCache,
    report: &mut GenerationReport,
) -> Result<GeneratedCalendar, GenerateError> {
    let key = document_cache_key(
        teacher,
        fingerprint,
        map,
        options.include_shared,
        &options.shared_inclusion,
    )
    .map_err(|e| GenerateError::Teacher {
        teacher: teacher.to_string(),
        reason: format!("{:#}", e),
    })?;

    if let Some(document) = cache.get(&key) {
        log::debug!("cache hit for '{}'", teacher);
        return Ok(GeneratedCalendar {
            teacher: teacher.to_string(),
            num_entries: document.matches("BEGIN:VEVENT").count(),
            document: document.clone(),
        });
    }

    let is_shared_request = teacher.to_lowercase() == SHARED_TOKEN;
    let mut entries = if is_shared_request {
        shared_entries.to_vec()
    } else {
        let partition = partition_for_teacher(schedule, teacher);
        build_partition_entries(&partition, schedule, report)
    };

    if options.include_shared && !is_shared_request {
        entries.extend_from_slice(shared_entries);
    }

    let document = calendar_document(&entries);
    cache.insert(key, document.clone());

    Ok(GeneratedCalendar {
        teacher: teacher.to_string(),
        document,
        num_entries: entries.len(),
    })
}
