use std::collections::HashMap;

use crate::core::domain::{OrderedSchedule, Session, TeacherPartition, SHARED_TOKEN};

/// Builds the partition of sessions taught by one teacher.
///
/// Matching is case-insensitive on the row's teacher tokens; shared rows
/// never land in an individual partition. Partition order is schedule
/// order, re-indexed from zero, because history positions are
/// partition-relative.
pub fn partition_for_teacher(schedule: &OrderedSchedule, teacher: &str) -> TeacherPartition {
    let sessions: Vec<Session> = schedule
        .sessions()
        .iter()
        .filter(|s| !s.is_shared() && s.has_teacher(teacher))
        .cloned()
        .collect();

    TeacherPartition::new(teacher.to_string(), sessions)
}

/// Builds the shared partition: rows whose teacher field is the shared
/// marker, filtered by the caller's inclusion toggles.
///
/// Toggles are keyed by original row position; absent keys mean included.
pub fn shared_partition(
    schedule: &OrderedSchedule,
    inclusion: &HashMap<usize, bool>,
) -> TeacherPartition {
    let sessions: Vec<Session> = schedule
        .sessions()
        .iter()
        .filter(|s| s.is_shared())
        .filter(|s| *inclusion.get(&s.original_index).unwrap_or(&true))
        .cloned()
        .collect();

    TeacherPartition::new(SHARED_TOKEN.to_string(), sessions)
}
