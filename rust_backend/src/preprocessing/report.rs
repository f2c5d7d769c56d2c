//! Structured diagnostics for normalization and calendar generation.
//!
//! The core never aborts on bad input: malformed cells get documented
//! defaults, unbuildable rows are skipped, and every such event is recorded
//! here. The report is written unconditionally; whether and how to display
//! it is the caller's concern.

use serde::{Deserialize, Serialize};

/// Accumulated warnings, errors, and counters for one generation run.
///
/// Errors mark outputs that are missing or incomplete (a skipped row, a
/// failed teacher document); warnings mark recovered field-parse problems.
/// `is_valid` is `false` once any error was recorded. Every entry is also
/// mirrored to the `log` facade at the matching level.
///
/// # Examples
///
/// ```
/// use rooster_rust::preprocessing::report::GenerationReport;
///
/// let mut report = GenerationReport::new();
/// assert!(report.is_valid);
///
/// report.add_warning("Onverwacht tijdformaat: '9u30'".to_string());
/// assert!(report.is_valid);
///
/// report.add_error("Regel overgeslagen (pos=3): onbekende datum".to_string());
/// assert!(!report.is_valid);
/// assert_eq!(report.errors.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: GenerationStats,
}

/// Counters collected while normalizing and generating.
///
/// # Fields
///
/// * `total_rows` - Rows seen in the input table
/// * `normalized_sessions` - Rows successfully normalized into sessions
/// * `unknown_dates` - Rows whose date cell did not parse
/// * `malformed_times` - Time cells that fell back to 00:00
/// * `entries_built` - Calendar entries emitted across all documents
/// * `rows_skipped` - Rows dropped at entry construction
/// * `shared_rows` - Sessions marked as shared ("allen")
/// * `shared_included` - Shared sessions that passed the inclusion map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStats {
    pub total_rows: usize,
    pub normalized_sessions: usize,
    pub unknown_dates: usize,
    pub malformed_times: usize,
    pub entries_built: usize,
    pub rows_skipped: usize,
    pub shared_rows: usize,
    pub shared_included: usize,
}

impl GenerationReport {
    /// Creates an empty report with valid status.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: GenerationStats::default(),
        }
    }

    /// Records an error and marks the report invalid.
    ///
    /// Errors describe a missing or incomplete output, never a process
    /// failure; generation always continues.
    pub fn add_error(&mut self, error: String) {
        log::error!("{}", error);
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Records a recovered problem without invalidating the report.
    pub fn add_warning(&mut self, warning: String) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Folds another report into this one, summing stats.
    ///
    /// Used to combine per-teacher reports into one run-level report.
    pub fn merge(&mut self, other: GenerationReport) {
        self.is_valid = self.is_valid && other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.stats.total_rows += other.stats.total_rows;
        self.stats.normalized_sessions += other.stats.normalized_sessions;
        self.stats.unknown_dates += other.stats.unknown_dates;
        self.stats.malformed_times += other.stats.malformed_times;
        self.stats.entries_built += other.stats.entries_built;
        self.stats.rows_skipped += other.stats.rows_skipped;
        self.stats.shared_rows += other.stats.shared_rows;
        self.stats.shared_included += other.stats.shared_included;
    }
}

impl Default for GenerationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GenerationStats {
    fn default() -> Self {
        Self {
            total_rows: 0,
            normalized_sessions: 0,
            unknown_dates: 0,
            malformed_times: 0,
            entries_built: 0,
            rows_skipped: 0,
            shared_rows: 0,
            shared_included: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_invalidate_warnings_do_not() {
        let mut report = GenerationReport::new();
        assert!(report.is_valid);

        report.add_warning("w".to_string());
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);

        report.add_error("e".to_string());
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn merge_sums_stats_and_joins_messages() {
        let mut a = GenerationReport::new();
        a.stats.total_rows = 3;
        a.stats.entries_built = 2;
        a.add_warning("first".to_string());

        let mut b = GenerationReport::new();
        b.stats.total_rows = 2;
        b.stats.rows_skipped = 1;
        b.add_error("second".to_string());

        a.merge(b);
        assert!(!a.is_valid);
        assert_eq!(a.stats.total_rows, 5);
        assert_eq!(a.stats.entries_built, 2);
        assert_eq!(a.stats.rows_skipped, 1);
        assert_eq!(a.warnings, vec!["first".to_string()]);
        assert_eq!(a.errors, vec!["second".to_string()]);
    }
}
