//! # API Module
//!
//! This module is the stable entry point for callers of the generator: the
//! CLI binary, tests, and any embedding application. It isolates callers
//! from internal implementations, allowing free evolution of:
//!
//! - Partitioning, history and series resolution
//! - The diagnostics report internals
//! - Caching and fingerprinting
//!
//! ## Architecture
//!
//! - [`types`]: flat request/result types (options, generated documents)
//! - [`generator`]: roster discovery and the generation entry points
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: options and inclusion toggles are parameters,
//!    never ambient state
//! 2. **Isolation**: one teacher's failure never touches another's output
//! 3. **Determinism**: identical inputs produce byte-identical documents

pub mod generator;
pub mod types;

// Re-export for convenience
pub use generator::{collect_teachers, generate_calendars, generate_calendars_cached};
pub use types::{CalendarBundle, GenerateOptions, GeneratedCalendar};
