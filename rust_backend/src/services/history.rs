use crate::core::domain::TeacherPartition;
use crate::time::dutch_long_date;

/// Which side of a partition position a history scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Previous,
    Future,
}

/// Collects the lesson lines for an entry's history paragraphs.
///
/// Scans one side of `position` within the partition: earlier positions
/// for [`HistoryMode::Previous`], later ones for [`HistoryMode::Future`],
/// both in partition order. A session matches when its teacher tokens
/// contain `teacher_token` (case-insensitive), its group equals `group`,
/// and, when a topic filter is given, its description equals the filter.
///
/// Lines render as `"{description} , {dutch date}"`. Exact duplicates
/// collapse to their first occurrence; no matches yields an empty list so
/// callers can omit the paragraph.
pub fn lesson_history(
    partition: &TeacherPartition,
    position: usize,
    mode: HistoryMode,
    group: &str,
    teacher_token: &str,
    topic_filter: Option<&str>,
) -> Vec<String> {
    let sessions = partition.sessions();
    let scan = match mode {
        HistoryMode::Previous => &sessions[..position.min(sessions.len())],
        HistoryMode::Future => sessions.get(position + 1..).unwrap_or(&[]),
    };

    let mut lines: Vec<String> = Vec::new();
    for session in scan {
        if !session.has_teacher(teacher_token) || session.group != group {
            continue;
        }
        if let Some(topic) = topic_filter {
            if session.description != topic {
                continue;
            }
        }

        let line = format!("{} , {}", session.description, dutch_long_date(&session.date));
        if !lines.contains(&line) {
            lines.push(line);
        }
    }

    lines
}
