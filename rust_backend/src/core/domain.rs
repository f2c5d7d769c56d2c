//! Domain models for schedule sessions and calendar entries.
//!
//! This module provides the core data structures that represent one class
//! schedule: normalized rows (sessions), the fully ordered schedule, the
//! per-teacher views of it, and the calendar entries generated from them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// The teacher token that marks a session as belonging to everyone.
///
/// A row whose teacher field parses to exactly this single token (compared
/// case-insensitively) is a shared session: it is excluded from every
/// individual teacher's partition and handled by the shared partition
/// instead.
pub const SHARED_TOKEN: &str = "allen";

/// A session date that may be unknown.
///
/// Dates are parsed leniently from free-form spreadsheet cells; anything
/// unparseable becomes [`SessionDate::Unknown`] instead of an error. The
/// derived ordering places `Unknown` after every known date, which is
/// exactly the rule the chronological sort needs.
///
/// # Examples
///
/// ```
/// use rooster_rust::core::domain::SessionDate;
/// use chrono::NaiveDate;
///
/// let known = SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// assert!(known < SessionDate::Unknown);
/// assert_eq!(known.as_date(), NaiveDate::from_ymd_opt(2024, 3, 11));
/// assert_eq!(SessionDate::Unknown.as_date(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionDate {
    Known(NaiveDate),
    Unknown,
}

impl SessionDate {
    /// Returns the underlying date, or `None` for an unknown date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            SessionDate::Known(d) => Some(*d),
            SessionDate::Unknown => None,
        }
    }

    /// Returns `true` if this is a known calendar date.
    pub fn is_known(&self) -> bool {
        matches!(self, SessionDate::Known(_))
    }

    /// Returns `true` if this date is strictly later than `other`.
    ///
    /// An unknown date on either side never satisfies "later", so unknown
    /// sessions can never appear as future occurrences of a series.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooster_rust::core::domain::SessionDate;
    /// use chrono::NaiveDate;
    ///
    /// let mar11 = SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    /// let mar18 = SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
    ///
    /// assert!(mar18.is_later_than(&mar11));
    /// assert!(!mar11.is_later_than(&mar18));
    /// assert!(!SessionDate::Unknown.is_later_than(&mar11));
    /// assert!(!mar18.is_later_than(&SessionDate::Unknown));
    /// ```
    pub fn is_later_than(&self, other: &SessionDate) -> bool {
        match (self, other) {
            (SessionDate::Known(a), SessionDate::Known(b)) => a > b,
            _ => false,
        }
    }
}

/// One normalized schedule row.
///
/// A `Session` is immutable once normalized: its identity is the position
/// of the row in the input table (`original_index`), which must survive
/// sorting so that externally supplied per-row settings (such as shared
/// session inclusion toggles) can still be matched up afterwards.
///
/// # Fields
///
/// * `original_index` - Position of the source row in the input table
/// * `date` - Calendar date, possibly unknown
/// * `start_time` - Start time of day; defaults to 00:00 when unparseable
/// * `end_time` - End time of day; defaults to 00:00 when unparseable
/// * `group` - Opaque student-group identifier, equality-compared only
/// * `room` - Opaque location label; may be blank
/// * `description` - Free-text topic label; drives display and series keys
/// * `teachers` - Teacher tokens in field order, original casing preserved
///
/// # Examples
///
/// ```
/// use rooster_rust::core::domain::{Session, SessionDate};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let session = Session {
///     original_index: 0,
///     date: SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///     group: "G1".to_string(),
///     room: "R1".to_string(),
///     description: "Intro".to_string(),
///     teachers: vec!["Jan".to_string(), "piet".to_string()],
/// };
///
/// assert!(session.has_teacher("jan"));
/// assert!(session.has_teacher("PIET"));
/// assert!(!session.is_shared());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub original_index: usize,
    pub date: SessionDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub group: String,
    pub room: String,
    pub description: String,
    pub teachers: Vec<String>,
}

impl Session {
    /// Returns `true` if `token` is one of this session's teachers.
    ///
    /// Comparison is case-insensitive; tokens keep their original casing
    /// for display.
    pub fn has_teacher(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        self.teachers.iter().any(|t| t.to_lowercase() == token)
    }

    /// Returns `true` if this session belongs to everyone.
    ///
    /// A session is shared when its teacher field parses to exactly the
    /// single token [`SHARED_TOKEN`], compared case-insensitively. A row
    /// listing the shared token alongside real teachers is not shared.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooster_rust::core::domain::{Session, SessionDate};
    /// use chrono::NaiveTime;
    ///
    /// let mut session = Session {
    ///     original_index: 0,
    ///     date: SessionDate::Unknown,
    ///     start_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    ///     group: String::new(),
    ///     room: String::new(),
    ///     description: String::new(),
    ///     teachers: vec!["Allen".to_string()],
    /// };
    /// assert!(session.is_shared());
    ///
    /// session.teachers.push("jan".to_string());
    /// assert!(!session.is_shared());
    /// ```
    pub fn is_shared(&self) -> bool {
        self.teachers.len() == 1 && self.teachers[0].to_lowercase() == SHARED_TOKEN
    }

    /// Combines the session date with its start time.
    ///
    /// Returns `None` when the date is unknown; such sessions cannot be
    /// placed on a calendar.
    pub fn start_datetime(&self) -> Option<NaiveDateTime> {
        self.date.as_date().map(|d| d.and_time(self.start_time))
    }

    /// Combines the session date with its end time.
    pub fn end_datetime(&self) -> Option<NaiveDateTime> {
        self.date.as_date().map(|d| d.and_time(self.end_time))
    }

    /// Joins the teacher tokens for display, in field order.
    ///
    /// An empty token list joins to the empty string; callers that want a
    /// placeholder substitute their own.
    pub fn teachers_joined(&self) -> String {
        self.teachers.join(", ")
    }
}

/// The full session collection in chronological order.
///
/// Built once per input table by the preprocessing pipeline and then shared
/// read-only by every partition and resolver. The order is the stable
/// three-key sort (date with unknown last, start time, description); see
/// the pipeline for the exact rule.
#[derive(Debug, Clone, Default)]
pub struct OrderedSchedule {
    sessions: Vec<Session>,
}

impl OrderedSchedule {
    /// Wraps an already-sorted session list.
    ///
    /// Callers outside the preprocessing pipeline normally never construct
    /// this directly.
    pub fn from_sorted(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// All sessions, in chronological order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Number of sessions in the schedule.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if the schedule holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// A re-indexed per-teacher (or shared) view of an [`OrderedSchedule`].
///
/// Positions within a partition run 0..n-1 and inherit the relative order
/// of the full schedule. Re-indexing matters because the history resolver's
/// "previous"/"future" semantics are positional within the partition, not
/// within the full schedule.
#[derive(Debug, Clone)]
pub struct TeacherPartition {
    /// The identity this partition was built for: a real teacher token, or
    /// [`SHARED_TOKEN`] for the shared partition.
    pub owner: String,
    sessions: Vec<Session>,
}

impl TeacherPartition {
    pub fn new(owner: String, sessions: Vec<Session>) -> Self {
        Self { owner, sessions }
    }

    /// Sessions of this partition, re-indexed 0..n-1.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// One schedulable unit of the output calendar.
///
/// Assembled by the calendar builder from a session and the resolved
/// history/continuity paragraphs, then serialized immediately into the
/// output document. Never mutated after construction. The uid is derived
/// from the row identity so identical inputs serialize to identical bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub description: String,
    pub uid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn session(teachers: &[&str]) -> Session {
        Session {
            original_index: 0,
            date: SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            group: "G1".to_string(),
            room: "R1".to_string(),
            description: "Intro".to_string(),
            teachers: teachers.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn unknown_date_sorts_after_known() {
        let known = SessionDate::Known(NaiveDate::from_ymd_opt(2099, 12, 31).unwrap());
        assert!(known < SessionDate::Unknown);
        assert!(SessionDate::Unknown > known);
        assert_eq!(SessionDate::Unknown, SessionDate::Unknown);
    }

    #[test]
    fn later_than_rejects_unknown_on_either_side() {
        let a = SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        let b = SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());

        assert!(b.is_later_than(&a));
        assert!(!a.is_later_than(&a));
        assert!(!SessionDate::Unknown.is_later_than(&a));
        assert!(!b.is_later_than(&SessionDate::Unknown));
        assert!(!SessionDate::Unknown.is_later_than(&SessionDate::Unknown));
    }

    #[test]
    fn teacher_membership_is_case_insensitive() {
        let s = session(&["Jan", "PIET"]);
        assert!(s.has_teacher("jan"));
        assert!(s.has_teacher("Piet"));
        assert!(s.has_teacher("  JAN "));
        assert!(!s.has_teacher("klaas"));
    }

    #[test]
    fn shared_requires_exactly_the_single_token() {
        assert!(session(&["allen"]).is_shared());
        assert!(session(&["Allen"]).is_shared());
        assert!(!session(&["allen", "jan"]).is_shared());
        assert!(!session(&["jan"]).is_shared());
        assert!(!session(&[]).is_shared());
    }

    #[test]
    fn datetimes_require_a_known_date() {
        let mut s = session(&["jan"]);
        let start = s.start_datetime().expect("known date should combine");
        assert_eq!(
            start,
            NaiveDate::from_ymd_opt(2024, 3, 11)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );

        s.date = SessionDate::Unknown;
        assert_eq!(s.start_datetime(), None);
        assert_eq!(s.end_datetime(), None);
    }

    #[test]
    fn teachers_joined_keeps_field_order() {
        assert_eq!(session(&["b", "a"]).teachers_joined(), "b, a");
        assert_eq!(session(&[]).teachers_joined(), "");
    }
}
