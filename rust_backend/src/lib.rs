//! Rooster Omzetter - turns a tabular class schedule into one iCalendar
//! document per teacher, annotated with lesson history and series
//! continuity.
//!
//! Start at [`api`] for generation, [`io`] for loading roster files. The
//! library never installs a logger; diagnostics go to the `log` facade and
//! into each run's [`preprocessing::report::GenerationReport`], and the
//! bundled CLI wires up `env_logger`.

pub mod core;
pub mod parsing;
pub mod preprocessing;
pub mod time;
pub mod services;
pub mod cache;
pub mod api;
pub mod io;
