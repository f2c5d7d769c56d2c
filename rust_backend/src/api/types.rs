//! Caller-facing request and result types.
//!
//! These are the only types a caller of the generator touches. They stay
//! deliberately flat (strings, plain maps, a diagnostics report) so the
//! internals (partitions, resolvers, the entry builder) can evolve freely
//! behind them.

use std::collections::HashMap;

use crate::io::archive::write_zip;
use crate::preprocessing::report::GenerationReport;
use crate::services::calendar::GenerateError;

/// Options for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Append the shared partition's entries to every generated calendar.
    pub include_shared: bool,
    /// Per-row toggles for the shared partition, keyed by original row
    /// position. Rows without an entry are included.
    pub shared_inclusion: HashMap<usize, bool>,
}

/// One generated calendar document.
#[derive(Debug, Clone)]
pub struct GeneratedCalendar {
    /// The identity the document was generated for: a teacher token, or
    /// `"allen"` for the shared category.
    pub teacher: String,
    /// The serialized iCalendar document.
    pub document: String,
    /// Number of events in the document.
    pub num_entries: usize,
}

/// Outcome of a generation run: the documents plus the diagnostics report.
///
/// A teacher whose generation failed has no calendar here; the failure is
/// recorded in the report instead.
#[derive(Debug, Clone)]
pub struct CalendarBundle {
    pub calendars: Vec<GeneratedCalendar>,
    pub report: GenerationReport,
}

impl CalendarBundle {
    /// The calendar generated for `teacher`, if generation succeeded.
    pub fn get(&self, teacher: &str) -> Option<&GeneratedCalendar> {
        self.calendars.iter().find(|c| c.teacher == teacher)
    }

    /// `(teacher, document)` pairs in generation order.
    pub fn documents(&self) -> Vec<(String, String)> {
        self.calendars
            .iter()
            .map(|c| (c.teacher.clone(), c.document.clone()))
            .collect()
    }

    /// Bundle every document into one ZIP archive.
    ///
    /// A packaging failure does not touch the individual documents; the
    /// caller decides whether to retry or ship them unbundled.
    pub fn zip_archive(&self) -> Result<Vec<u8>, GenerateError> {
        write_zip(&self.documents()).map_err(|e| GenerateError::Packaging {
            reason: format!("{:#}", e),
        })
    }
}
