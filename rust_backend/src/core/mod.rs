//! Core domain models for schedule-to-calendar conversion.
//!
//! This module defines the fundamental data structures used throughout the
//! converter, representing normalized schedule rows, the chronologically
//! ordered schedule, per-teacher partitions, and calendar output entries.

pub mod domain;
