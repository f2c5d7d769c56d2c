//! High-level input and output utilities.
//!
//! This module combines the format parsers with error context and produces
//! ready-to-use tables. The configuration reader and the archive packager
//! sit at the same edge of the crate: everything that touches the
//! filesystem lives here, nothing in the core does.
//!
//! # Example
//!
//! ```no_run
//! use rooster_rust::io::loaders::ScheduleLoader;
//! use std::path::Path;
//!
//! let result = ScheduleLoader::load_from_file(Path::new("rooster.xlsx"))
//!     .expect("Failed to load");
//! println!("Loaded {} rows", result.num_rows);
//! ```

pub mod archive;
pub mod config;
pub mod loaders;

pub use archive::{write_zip, ARCHIVE_NAME};
pub use config::{GenerationSettings, GeneratorConfig};
pub use loaders::{ScheduleLoader, ScheduleLoadResult, ScheduleSourceType};
