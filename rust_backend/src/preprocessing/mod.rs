pub mod pipeline;
pub mod report;

pub use pipeline::{preprocess_table, sort_schedule, PreprocessResult};
pub use report::{GenerationReport, GenerationStats};
