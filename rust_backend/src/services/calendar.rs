use chrono::NaiveDateTime;
use icalendar::{Calendar, Component, Event, EventLike, Property};
use thiserror::Error;

use crate::core::domain::{
    CalendarEntry, OrderedSchedule, Session, TeacherPartition, SHARED_TOKEN,
};
use crate::preprocessing::report::GenerationReport;
use crate::services::history::{lesson_history, HistoryMode};
use crate::services::series::future_series_lessons;

/// Product identifier stamped on every generated document.
pub const PRODID: &str = "-//Rooster Omzetter//NONSGML v1.0//NL";

const PREVIOUS_HEADER: &str = "Vorige lessen:";
const FUTURE_HEADER: &str = "Toekomstige lessen:";
const SERIES_HEADER: &str = "Andere lessen in deze serie (komend, met docent):";

/// Failure of one generation unit.
///
/// Failures stay contained: a teacher failure leaves every other teacher's
/// document intact, and a packaging failure leaves the individual
/// documents intact.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Er is een fout opgetreden voor docent {teacher}: {reason}")]
    Teacher { teacher: String, reason: String },
    #[error("Inpakken van het archief is mislukt: {reason}")]
    Packaging { reason: String },
}

/// Builds the calendar entries for one partition, in partition order.
///
/// A row without a date cannot become an event; it is skipped with a
/// per-row diagnostic naming its partition position, and the rest of the
/// partition continues. Series continuity is resolved against the full
/// schedule, so continuations by other teachers are visible.
pub fn build_partition_entries(
    partition: &TeacherPartition,
    schedule: &OrderedSchedule,
    report: &mut GenerationReport,
) -> Vec<CalendarEntry> {
    let mut entries = Vec::with_capacity(partition.len());

    for (pos, session) in partition.sessions().iter().enumerate() {
        match build_entry(partition, pos, session, schedule) {
            Some(entry) => {
                report.stats.entries_built += 1;
                entries.push(entry);
            }
            None => {
                report.stats.rows_skipped += 1;
                report.add_warning(skip_message(&partition.owner, pos));
            }
        }
    }

    entries
}

fn skip_message(owner: &str, pos: usize) -> String {
    if owner == SHARED_TOKEN {
        format!(
            "'Allen'-regel overgeslagen (pos={}) door fout: onbekende datum",
            pos
        )
    } else {
        format!("Regel overgeslagen (pos={}) door fout: onbekende datum", pos)
    }
}

fn build_entry(
    partition: &TeacherPartition,
    pos: usize,
    session: &Session,
    schedule: &OrderedSchedule,
) -> Option<CalendarEntry> {
    let start = session.start_datetime()?;
    let end = session.end_datetime()?;

    let title = format!("{} - {}", session.description, session.teachers_joined());

    let mut description = format!(
        "{} - Groep: {}\nLokaal: {}",
        session.description, session.group, session.room
    );

    let topic = Some(session.description.as_str());
    let previous = lesson_history(
        partition,
        pos,
        HistoryMode::Previous,
        &session.group,
        &partition.owner,
        topic,
    );
    let future = lesson_history(
        partition,
        pos,
        HistoryMode::Future,
        &session.group,
        &partition.owner,
        topic,
    );
    let series = future_series_lessons(session, schedule);

    for (header, lines) in [
        (PREVIOUS_HEADER, &previous),
        (FUTURE_HEADER, &future),
        (SERIES_HEADER, &series),
    ] {
        if !lines.is_empty() {
            description.push_str("\n\n");
            description.push_str(header);
            description.push('\n');
            description.push_str(&lines.join("\n"));
        }
    }

    Some(CalendarEntry {
        title,
        start,
        end,
        description,
        uid: entry_uid(session, &start),
    })
}

// The uid follows the row, not the partition, so a shared row keeps one
// identity across every document it is appended to.
fn entry_uid(session: &Session, start: &NaiveDateTime) -> String {
    format!(
        "rooster-{}-{}@rooster-omzetter",
        session.original_index,
        start.format("%Y%m%dT%H%M%S")
    )
}

/// Serializes entries into one iCalendar document.
///
/// Every event carries an explicit UID and DTSTAMP derived from the entry
/// itself, never from the clock, so identical inputs produce identical
/// bytes.
pub fn calendar_document(entries: &[CalendarEntry]) -> String {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("PRODID", PRODID));

    for entry in entries {
        let dtstamp = format!("{}Z", entry.start.format("%Y%m%dT%H%M%S"));
        let event = Event::new()
            .uid(&entry.uid)
            .summary(&entry.title)
            .description(&entry.description)
            .starts(entry.start)
            .ends(entry.end)
            .append_property(Property::new("DTSTAMP", dtstamp.as_str()))
            .done();
        cal.push(event);
    }

    cal.to_string()
}
