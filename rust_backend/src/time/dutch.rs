use chrono::{Datelike, NaiveDate};

use crate::core::domain::SessionDate;

/// Rendering of an unknown session date.
pub const UNKNOWN_DATE: &str = "onbekende datum";

// Monday-first, matching chrono's num_days_from_monday.
const WEEKDAYS: [&str; 7] = [
    "maandag",
    "dinsdag",
    "woensdag",
    "donderdag",
    "vrijdag",
    "zaterdag",
    "zondag",
];

const MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
];

/// Renders a session date as a long Dutch date string.
///
/// Format is "<weekday> <dd> <month> <year>" with the day zero-padded to
/// two digits, e.g. "maandag 04 maart 2024". An unknown date renders as
/// the fixed [`UNKNOWN_DATE`] literal.
///
/// # Example
///
/// ```
/// use rooster_rust::core::domain::SessionDate;
/// use rooster_rust::time::dutch_long_date;
/// use chrono::NaiveDate;
///
/// let date = SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// assert_eq!(dutch_long_date(&date), "maandag 11 maart 2024");
/// assert_eq!(dutch_long_date(&SessionDate::Unknown), "onbekende datum");
/// ```
pub fn dutch_long_date(date: &SessionDate) -> String {
    match date.as_date() {
        Some(d) => format_known(d),
        None => UNKNOWN_DATE.to_string(),
    }
}

fn format_known(d: NaiveDate) -> String {
    let weekday = WEEKDAYS[d.weekday().num_days_from_monday() as usize];
    let month = MONTHS[(d.month() - 1) as usize];
    format!("{} {:02} {} {}", weekday, d.day(), month, d.year())
}
