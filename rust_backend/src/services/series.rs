use crate::core::domain::{OrderedSchedule, Session};
use crate::parsing::series::series_key;
use crate::time::dutch_long_date;

/// Rendered when a continuation session names no teacher at all.
const UNKNOWN_TEACHER: &str = "onbekend";

/// Lists upcoming lessons of the same series across the whole schedule.
///
/// Unlike the history resolver this looks past partition boundaries: a
/// series continued by a different teacher still shows up, which is the
/// point of the paragraph. Candidates share the session's series key and
/// group and lie strictly later; sessions without a date never qualify on
/// either side.
///
/// Lines render as
/// `"{dutch date} – {description} – {teachers} (lokaal: {room})"` with the
/// teachers joined by `", "`, or `"onbekend"` when the row names none.
/// Exact duplicates collapse to their first occurrence.
pub fn future_series_lessons(session: &Session, schedule: &OrderedSchedule) -> Vec<String> {
    let key = series_key(&session.description);

    let mut lines: Vec<String> = Vec::new();
    for candidate in schedule.sessions() {
        if candidate.group != session.group {
            continue;
        }
        if !candidate.date.is_later_than(&session.date) {
            continue;
        }
        if series_key(&candidate.description) != key {
            continue;
        }

        let teachers = if candidate.teachers.is_empty() {
            UNKNOWN_TEACHER.to_string()
        } else {
            candidate.teachers_joined()
        };
        let line = format!(
            "{} – {} – {} (lokaal: {})",
            dutch_long_date(&candidate.date),
            candidate.description,
            teachers,
            candidate.room
        );
        if !lines.contains(&line) {
            lines.push(line);
        }
    }

    lines
}
