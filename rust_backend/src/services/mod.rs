//! Resolvers and builders that turn an ordered schedule into calendars.
//!
//! This layer sits between preprocessing and the output documents: it
//! partitions the schedule per teacher, resolves history and series
//! paragraphs, and assembles entries into iCalendar documents.

pub mod calendar;
pub mod history;
pub mod partition;
pub mod series;

pub use calendar::{build_partition_entries, calendar_document, GenerateError, PRODID};
pub use history::{lesson_history, HistoryMode};
pub use partition::{partition_for_teacher, shared_partition};
pub use series::future_series_lessons;
