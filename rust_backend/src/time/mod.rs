pub mod dutch;

pub use dutch::{dutch_long_date, UNKNOWN_DATE};
