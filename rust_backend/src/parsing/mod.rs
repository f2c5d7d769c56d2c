//! Parsers for schedule table data formats.
//!
//! This module provides parsers for the table formats schedule exports come
//! in, plus the shared table representation and the field-level normalizers
//! that turn raw cells into typed session data.
//!
//! # Parsers
//!
//! - [`xlsx_parser`]: Parse XLSX workbook exports (typed cells preserved)
//! - [`csv_parser`]: Parse CSV schedule exports
//! - [`json_parser`]: Parse JSON arrays of flat row objects
//! - [`columns`]: Heuristic column detection for unfamiliar headers
//! - [`fields`]: Lenient date, strict time, and teacher-list normalizers
//! - [`series`]: Series key derivation for lesson descriptions
//!
//! # Example
//!
//! ```no_run
//! use rooster_rust::parsing::xlsx_parser::parse_schedule_xlsx;
//! use std::path::Path;
//!
//! let table = parse_schedule_xlsx(Path::new("rooster.xlsx"))
//!     .expect("Failed to parse schedule");
//! ```

pub mod columns;
pub mod csv_parser;
pub mod fields;
pub mod json_parser;
pub mod series;
pub mod table;
pub mod xlsx_parser;


pub use table::{CellValue, ColumnMap, RawTable};
